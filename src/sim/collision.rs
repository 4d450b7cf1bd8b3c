//! Collision detection and response
//!
//! Everything here is exact and brute force: arena populations are small, so
//! asteroid pairs are checked O(n²) and bodies against walls O(n·6).
//!
//! Detection (`detect_*`, predicates) never mutates anything and returns
//! indices; the tick applies effects afterwards with the `resolve_*`
//! functions or by mutating entity state directly.

use glam::Vec3;

use super::arena::Wall;
use super::asteroid::Asteroid;
use super::body::Body;

/// Extra gap left between separated spheres so they aren't touching next frame
const SEPARATION_SLOP: f32 = 0.01;

/// Whether a sphere touches or crosses a wall plane
#[inline]
pub fn sphere_hits_wall(wall: &Wall, centre: Vec3, radius: f32) -> bool {
    wall.signed_distance(centre) <= radius
}

/// Whether a point is on or beyond a wall plane
#[inline]
pub fn point_hits_wall(wall: &Wall, point: Vec3) -> bool {
    sphere_hits_wall(wall, point, 0.0)
}

/// Whether two spheres touch or overlap (touching counts)
#[inline]
pub fn spheres_overlap(c1: Vec3, r1: f32, c2: Vec3, r2: f32) -> bool {
    c1.distance(c2) <= r1 + r2
}

/// Whether a point lies in or on a sphere
#[inline]
pub fn point_in_sphere(point: Vec3, centre: Vec3, radius: f32) -> bool {
    spheres_overlap(point, 0.0, centre, radius)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce an asteroid off a wall and push it back inside by the penetration depth
pub fn resolve_wall(wall: &Wall, asteroid: &mut Asteroid) {
    asteroid.vel = reflect_velocity(asteroid.vel, wall.normal);
    let penetration = asteroid.radius - wall.signed_distance(asteroid.pos);
    if penetration > 0.0 {
        asteroid.pos -= wall.normal * (penetration + SEPARATION_SLOP);
    }
}

/// Elastic collision between two asteroids.
///
/// Velocity components along the line of centres are exchanged as a 1D
/// elastic collision (masses ∝ r³), tangential components are untouched.
/// Nothing is exchanged when the pair is already separating. The spheres are
/// then pushed apart along the line of centres, heavier one moving less.
pub fn resolve_asteroids(a: &mut Asteroid, b: &mut Asteroid) {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    // Coincident centres: any axis will do
    let normal = if dist > 1e-6 { delta / dist } else { Vec3::X };

    let (m1, m2) = (a.mass(), b.mass());
    let total = m1 + m2;

    let v1n = a.vel.dot(normal);
    let v2n = b.vel.dot(normal);
    if v1n - v2n > 0.0 {
        let v1n_new = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / total;
        let v2n_new = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / total;
        a.vel += (v1n_new - v1n) * normal;
        b.vel += (v2n_new - v2n) * normal;
    }

    let penetration = a.radius + b.radius - dist;
    if penetration > 0.0 {
        let push = penetration + SEPARATION_SLOP;
        a.pos -= normal * push * (m2 / total);
        b.pos += normal * push * (m1 / total);
    }
}

/// Proximity of the ship to each wall
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipWallContacts {
    /// Per wall: ship within warning distance
    pub warning: Vec<bool>,
    /// First wall the ship actually hit
    pub fatal: Option<usize>,
}

/// Check the ship against every wall at warning and collision distance
pub fn detect_ship_walls(
    walls: &[Wall],
    ship_pos: Vec3,
    warning_radius: f32,
    collision_radius: f32,
) -> ShipWallContacts {
    ShipWallContacts {
        warning: walls
            .iter()
            .map(|wall| sphere_hits_wall(wall, ship_pos, warning_radius))
            .collect(),
        fatal: walls
            .iter()
            .position(|wall| sphere_hits_wall(wall, ship_pos, collision_radius)),
    }
}

/// First eligible body overlapping the given sphere
pub fn first_body_hitting_sphere<B: Body>(
    bodies: &[B],
    centre: Vec3,
    radius: f32,
    eligible: impl Fn(&B) -> bool,
) -> Option<usize> {
    bodies
        .iter()
        .position(|b| eligible(b) && spheres_overlap(b.position(), b.radius(), centre, radius))
}

/// Every (body, wall) pair in contact
pub fn detect_wall_contacts<B: Body>(
    bodies: &[B],
    walls: &[Wall],
    eligible: impl Fn(&B) -> bool,
) -> Vec<(usize, usize)> {
    let mut contacts = Vec::new();
    for (i, body) in bodies.iter().enumerate() {
        if !eligible(body) {
            continue;
        }
        for (w, wall) in walls.iter().enumerate() {
            if sphere_hits_wall(wall, body.position(), body.radius()) {
                contacts.push((i, w));
            }
        }
    }
    contacts
}

/// Every unordered pair of distinct eligible bodies that overlap (i < j)
pub fn detect_pairs<B: Body>(bodies: &[B], eligible: impl Fn(&B) -> bool) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        if !eligible(a) {
            continue;
        }
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            if a.id() == b.id() || !eligible(b) {
                continue;
            }
            if spheres_overlap(a.position(), a.radius(), b.position(), b.radius()) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// For each live projectile, the first live target it touches
pub fn detect_hits<P: Body, T: Body>(projectiles: &[P], targets: &[T]) -> Vec<(usize, usize)> {
    projectiles
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_marked_for_deletion())
        .filter_map(|(i, p)| {
            targets
                .iter()
                .position(|t| {
                    !t.is_marked_for_deletion()
                        && spheres_overlap(p.position(), p.radius(), t.position(), t.radius())
                })
                .map(|t| (i, t))
        })
        .collect()
}
