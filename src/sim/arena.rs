//! Arena geometry: six static wall planes and the orbiting satellite
//!
//! The arena is a cube of half-extent `dim` centred on the origin. Each wall
//! stores a point on its plane and its outward unit normal, so
//! `(wall.position - p) · normal` is positive for points on the arena side.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{SATELLITE_ORBIT_RADIUS, SATELLITE_SPEED};

/// Display colour of a wall, driven by ship proximity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallColour {
    #[default]
    White,
    /// Ship is within warning distance
    Red,
}

/// One bounding plane of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// A point on the plane
    pub position: Vec3,
    /// Outward unit normal
    pub normal: Vec3,
    pub colour: WallColour,
}

impl Wall {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: normal.normalize_or_zero(),
            colour: WallColour::White,
        }
    }

    /// Distance from `point` to the plane, positive on the arena side
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (self.position - point).dot(self.normal)
    }

    pub fn set_colour(&mut self, colour: WallColour) {
        self.colour = colour;
    }
}

/// The bounded play volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub dim: f32,
    walls: Vec<Wall>,
}

impl Arena {
    pub fn new(dim: f32) -> Self {
        let mut walls = Vec::with_capacity(6);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            for sign in [1.0, -1.0] {
                let normal = axis * sign;
                walls.push(Wall::new(normal * dim, normal));
            }
        }
        Self { dim, walls }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut [Wall] {
        &mut self.walls
    }

    /// Radius of the sphere circumscribing the cube
    pub fn radius(&self) -> f32 {
        3.0_f32.sqrt() * self.dim
    }

    /// Whether `point` lies inside the cube shrunk by `margin` on every side
    pub fn contains(&self, point: Vec3, margin: f32) -> bool {
        point.abs().max_element() <= self.dim - margin
    }

    /// Back to all-white walls
    pub fn reset_colours(&mut self) {
        for wall in &mut self.walls {
            wall.colour = WallColour::White;
        }
    }
}

/// Light-carrying decoration orbiting the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    /// Degrees around the orbit
    pub angle: f32,
    pub orbit_radius: f32,
    /// Degrees per second
    pub speed: f32,
}

impl Default for Satellite {
    fn default() -> Self {
        Self {
            angle: 0.0,
            orbit_radius: SATELLITE_ORBIT_RADIUS,
            speed: SATELLITE_SPEED,
        }
    }
}

impl Satellite {
    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt).rem_euclid(360.0);
    }

    /// Current world position (orbits in the XZ plane)
    pub fn position(&self) -> Vec3 {
        let theta = self.angle.to_radians();
        Vec3::new(theta.cos(), 0.0, theta.sin()) * self.orbit_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_has_six_outward_walls() {
        let arena = Arena::new(100.0);
        assert_eq!(arena.walls().len(), 6);
        for wall in arena.walls() {
            // Origin is inside, 100 units from every wall
            assert!((wall.signed_distance(Vec3::ZERO) - 100.0).abs() < 1e-4);
            // Wall normal points away from the centre
            assert!(wall.normal.dot(wall.position) > 0.0);
        }
    }

    #[test]
    fn test_signed_distance_negative_outside() {
        let floor = Wall::new(Vec3::new(0.0, -10.0, 0.0), Vec3::NEG_Y);
        assert!((floor.signed_distance(Vec3::new(3.0, -8.0, 1.0)) - 2.0).abs() < 1e-5);
        assert!((floor.signed_distance(Vec3::new(0.0, -12.0, 0.0)) + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_contains_uses_cube_bounds() {
        let arena = Arena::new(100.0);
        // Near a corner: outside the inscribed sphere but still inside the cube
        assert!(arena.contains(Vec3::splat(90.0), 0.5));
        assert!(!arena.contains(Vec3::new(0.0, 99.8, 0.0), 0.5));
        assert!(!arena.contains(Vec3::new(-150.0, 0.0, 0.0), 0.5));
        assert!((arena.radius() - Vec3::splat(100.0).length()).abs() < 1e-3);
    }

    #[test]
    fn test_satellite_orbits() {
        let mut sat = Satellite::default();
        let start = sat.position();
        sat.update(90.0 / sat.speed);
        let quarter = sat.position();
        assert!((start.length() - quarter.length()).abs() < 1e-2);
        assert!(start.dot(quarter).abs() < 1e-1 * sat.orbit_radius);
        sat.update(360.0 / sat.speed);
        assert!(sat.angle < 360.0);
    }
}
