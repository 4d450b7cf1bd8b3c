//! Asteroids and the asteroid field
//!
//! Asteroids spawn on the sphere circumscribing the arena and fly at the ship.
//! Their arena presence is tracked as a small state machine:
//!
//! ```text
//! Approaching --enter--> Inside --leave--> Escaped{n} --enter--> Inside
//!                                              |
//!                                n >= debounce frames outside
//!                                              v
//!                                     marked for deletion
//! ```
//!
//! An asteroid that is still approaching is never dropped by the boundary
//! rule; it is on its way in.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{Body, cull_marked};
use super::math::random_unit;
use crate::assets::{AssetRegistry, EntityKind, TextureId};
use crate::consts::ARENA_INSIDE_MARGIN;
use crate::tuning::Tuning;

/// Where an asteroid is relative to the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPresence {
    /// Spawned outside, has not entered yet
    Approaching,
    /// Inside the arena; walls and other asteroids affect it
    Inside,
    /// Was inside, now outside for this many consecutive frames
    Escaped { frames_outside: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    pub health: i32,
    pub presence: ArenaPresence,
    pub texture: TextureId,
    marked_for_deletion: bool,
}

impl Asteroid {
    pub fn new(id: u32, pos: Vec3, vel: Vec3, radius: f32, health: i32, texture: TextureId) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            id,
            pos,
            vel,
            radius,
            health,
            presence: ArenaPresence::Approaching,
            texture,
            marked_for_deletion: false,
        }
    }

    pub fn is_in_arena(&self) -> bool {
        self.presence == ArenaPresence::Inside
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Mass for collision response (uniform density)
    pub fn mass(&self) -> f32 {
        self.radius * self.radius * self.radius
    }

    /// Apply damage. Returns true only on the hit that destroys the asteroid.
    pub fn decrement_health_by(&mut self, amount: i32) -> bool {
        let was_alive = !self.is_destroyed();
        self.health -= amount;
        was_alive && self.is_destroyed()
    }

    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    /// Advance the presence state machine for the current position.
    ///
    /// Entering takes the whole sphere inside the walls; leaving takes the
    /// centre outside them. An inside asteroid touching a wall therefore stays
    /// inside and gets bounced.
    pub fn track_presence(&mut self, arena: &Arena, debounce_frames: u32) {
        let entered = arena.contains(self.pos, ARENA_INSIDE_MARGIN + self.radius);
        let centre_inside = arena.contains(self.pos, ARENA_INSIDE_MARGIN);
        self.presence = match self.presence {
            ArenaPresence::Approaching if entered => ArenaPresence::Inside,
            ArenaPresence::Approaching => ArenaPresence::Approaching,
            _ if centre_inside => ArenaPresence::Inside,
            ArenaPresence::Inside => ArenaPresence::Escaped { frames_outside: 1 },
            ArenaPresence::Escaped { frames_outside } => ArenaPresence::Escaped {
                frames_outside: frames_outside.saturating_add(1),
            },
        };
        if let ArenaPresence::Escaped { frames_outside } = self.presence {
            if frames_outside >= debounce_frames {
                self.mark_for_deletion();
            }
        }
    }
}

impl Body for Asteroid {
    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion || self.is_destroyed()
    }
}

/// The live set of asteroids plus wave bookkeeping.
///
/// Removal swaps the last asteroid into the freed slot, so indices are only
/// valid until the next deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidField {
    asteroids: Vec<Asteroid>,
    /// Size of the next wave
    asteroid_count: u32,
    /// Seconds since the last wave
    timer: f32,
    time_between_levels: f32,
    textures: Vec<TextureId>,
    next_id: u32,
    tuning: Tuning,
}

impl AsteroidField {
    pub fn new(tuning: &Tuning, assets: &AssetRegistry) -> Self {
        Self {
            asteroids: Vec::new(),
            asteroid_count: tuning.initial_asteroid_count,
            timer: 0.0,
            time_between_levels: tuning.time_between_levels,
            textures: EntityKind::ASTEROIDS
                .iter()
                .map(|kind| assets.texture_id(*kind))
                .collect(),
            next_id: 0,
            tuning: tuning.clone(),
        }
    }

    /// Spawn `asteroid_count` asteroids on the spawn shell, each aimed at the ship
    pub fn launch_asteroids_at_ship<R: Rng>(&mut self, ship_position: Vec3, rng: &mut R) -> u32 {
        let arena_radius = self.tuning.arena_radius();
        for _ in 0..self.asteroid_count {
            let speed = rng.random_range(self.tuning.asteroid_min_speed..=self.tuning.asteroid_max_speed);
            let pos = random_unit(rng) * arena_radius;
            let vel = (ship_position - pos).normalize_or_zero() * speed;
            let scale = rng.random_range(self.tuning.asteroid_min_scale..=self.tuning.asteroid_max_scale);
            let texture = if self.textures.is_empty() {
                TextureId::NONE
            } else {
                self.textures[rng.random_range(0..self.textures.len())]
            };

            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.asteroids.push(Asteroid::new(
                id,
                pos,
                vel,
                self.tuning.asteroid_base_radius * scale,
                self.tuning.asteroid_health,
                texture,
            ));
        }
        log::info!("Launched {} asteroids at {:?}", self.asteroid_count, ship_position);
        self.asteroid_count
    }

    /// Integrate, track arena presence, and drop dead or escaped asteroids.
    /// Returns how many were removed.
    pub fn update(&mut self, dt: f32, arena: &Arena) -> usize {
        self.timer += dt;
        let debounce = self.tuning.escape_debounce_frames;
        for asteroid in &mut self.asteroids {
            asteroid.update(dt);
            asteroid.track_presence(arena, debounce);
            // Missed the arena entirely and is heading back out past the spawn shell
            if asteroid.presence == ArenaPresence::Approaching
                && asteroid.pos.length() > arena.radius() + asteroid.radius
            {
                asteroid.mark_for_deletion();
            }
        }
        self.cull()
    }

    /// Remove asteroids that are marked or out of health
    pub fn cull(&mut self) -> usize {
        let removed = cull_marked(&mut self.asteroids);
        if removed > 0 {
            log::debug!("Removed {} asteroids ({} left)", removed, self.asteroids.len());
        }
        removed
    }

    /// Whether the level timer ran out; restarts the timer when it did
    pub fn levelling_up(&mut self) -> bool {
        if self.timer >= self.time_between_levels {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset_timer(&mut self) {
        self.timer = 0.0;
    }

    pub fn increase_asteroid_count_by(&mut self, amount: u32) {
        self.asteroid_count = self.asteroid_count.saturating_add(amount);
    }

    pub fn asteroid_count(&self) -> u32 {
        self.asteroid_count
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// O(1) removal; the last asteroid takes index `index`
    pub fn delete_by_index(&mut self, index: usize) -> Option<Asteroid> {
        (index < self.asteroids.len()).then(|| self.asteroids.swap_remove(index))
    }

    /// Empty the field and restart wave progression
    pub fn reset(&mut self) {
        self.asteroids.clear();
        self.asteroid_count = self.tuning.initial_asteroid_count;
        self.timer = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn asteroids_mut(&mut self) -> &mut [Asteroid] {
        &mut self.asteroids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> AsteroidField {
        AsteroidField::new(&Tuning::default(), &AssetRegistry::with_placeholder_handles())
    }

    fn rock(id: u32, pos: Vec3) -> Asteroid {
        Asteroid::new(id, pos, Vec3::ZERO, 10.0, 3, TextureId::NONE)
    }

    #[test]
    fn test_launch_on_shell_aimed_at_ship() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(7);
        let launched = field.launch_asteroids_at_ship(Vec3::ZERO, &mut rng);
        let tuning = Tuning::default();

        assert_eq!(launched, tuning.initial_asteroid_count);
        assert_eq!(field.len(), launched as usize);
        for a in field.iter() {
            assert!((a.pos.length() - tuning.arena_radius()).abs() < 0.01);
            let to_ship = (Vec3::ZERO - a.pos).normalize();
            assert!(a.vel.normalize().dot(to_ship) > 0.999);
            let speed = a.vel.length();
            assert!(speed >= tuning.asteroid_min_speed - 1e-3);
            assert!(speed <= tuning.asteroid_max_speed + 1e-3);
            assert!(a.radius > 0.0);
            assert_eq!(a.health, tuning.asteroid_health);
            assert_eq!(a.presence, ArenaPresence::Approaching);
            assert_ne!(a.texture, TextureId::NONE);
        }
    }

    #[test]
    fn test_launch_aims_at_offset_ship() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(3);
        let ship = Vec3::new(100.0, -50.0, 20.0);
        field.launch_asteroids_at_ship(ship, &mut rng);
        for a in field.iter() {
            assert!(a.vel.normalize().dot((ship - a.pos).normalize()) > 0.999);
        }
    }

    #[test]
    fn test_ids_unique_in_live_set() {
        let mut field = field();
        let mut rng = Pcg32::seed_from_u64(11);
        field.launch_asteroids_at_ship(Vec3::ZERO, &mut rng);
        field.launch_asteroids_at_ship(Vec3::ZERO, &mut rng);
        let mut ids: Vec<u32> = field.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), field.len());
    }

    #[test]
    fn test_delete_by_index_swaps_last() {
        let mut field = field();
        for i in 0..4 {
            field.push(rock(i, Vec3::ZERO));
        }
        let removed = field.delete_by_index(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(field.len(), 3);
        let mut ids: Vec<u32> = field.iter().map(|a| a.id).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 2, 3]);

        // Deleting the last element is a plain pop
        let removed = field.delete_by_index(2).unwrap();
        assert_eq!(field.len(), 2);
        assert!(field.iter().all(|a| a.id != removed.id));

        assert!(field.delete_by_index(2).is_none());
    }

    #[test]
    fn test_presence_debounce() {
        let arena = Arena::new(100.0);
        let mut a = rock(0, Vec3::new(95.0, 0.0, 0.0));

        // Still crossing the wall
        a.track_presence(&arena, 2);
        assert_eq!(a.presence, ArenaPresence::Approaching);
        assert!(!a.is_marked_for_deletion());

        a.pos.x = 85.0;
        a.track_presence(&arena, 2);
        assert!(a.is_in_arena());

        // Touching the wall again does not count as leaving
        a.pos.x = 95.0;
        a.track_presence(&arena, 2);
        assert!(a.is_in_arena());

        // One frame out, then back in: cleared
        a.pos.x = 101.0;
        a.track_presence(&arena, 2);
        assert_eq!(a.presence, ArenaPresence::Escaped { frames_outside: 1 });
        assert!(!a.is_marked_for_deletion());
        a.pos.x = 95.0;
        a.track_presence(&arena, 2);
        assert!(a.is_in_arena());

        // Two consecutive frames out: gone
        a.pos.x = 101.0;
        a.track_presence(&arena, 2);
        a.track_presence(&arena, 2);
        assert!(a.is_marked_for_deletion());
    }

    #[test]
    fn test_update_drops_escaped_and_dead() {
        let tuning = Tuning::default();
        let arena = Arena::new(tuning.arena_dim);
        let mut field = field();

        let mut escaping = rock(0, Vec3::new(tuning.arena_dim - 1.0, 0.0, 0.0));
        escaping.presence = ArenaPresence::Inside;
        escaping.vel = Vec3::new(100.0, 0.0, 0.0);
        field.push(escaping);

        let mut dead = rock(1, Vec3::ZERO);
        dead.health = 0;
        field.push(dead);

        field.push(rock(2, Vec3::ZERO));

        // Frame 1: dead one removed, escaper flagged
        assert_eq!(field.update(0.1, &arena), 1);
        assert_eq!(field.len(), 2);
        // Frame 2: escaper still outside, removed
        assert_eq!(field.update(0.1, &arena), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.asteroids()[0].id, 2);
    }

    #[test]
    fn test_missed_approach_is_dropped() {
        let tuning = Tuning::default();
        let arena = Arena::new(tuning.arena_dim);
        let mut field = field();

        // Flying away from the arena on the spawn shell
        let mut a = rock(0, Vec3::new(0.0, 0.0, arena.radius()));
        a.vel = Vec3::new(0.0, 0.0, 200.0);
        field.push(a);

        assert_eq!(field.update(0.1, &arena), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_decrement_reports_destroying_hit_once() {
        let mut a = rock(0, Vec3::ZERO);
        assert!(!a.decrement_health_by(1));
        assert!(!a.decrement_health_by(1));
        assert!(a.decrement_health_by(1));
        assert!(!a.decrement_health_by(1));
        assert!(a.is_destroyed());
    }

    #[test]
    fn test_level_timer_and_reset() {
        let tuning = Tuning::default();
        let arena = Arena::new(tuning.arena_dim);
        let mut field = field();
        assert!(!field.levelling_up());
        field.update(tuning.time_between_levels, &arena);
        assert!(field.levelling_up());
        assert_eq!(field.timer(), 0.0);

        field.increase_asteroid_count_by(1);
        assert_eq!(field.asteroid_count(), tuning.initial_asteroid_count + 1);
        field.push(rock(0, Vec3::ZERO));
        field.reset();
        assert!(field.is_empty());
        assert_eq!(field.asteroid_count(), tuning.initial_asteroid_count);
    }
}
