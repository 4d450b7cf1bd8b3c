//! Game state
//!
//! Everything one frame of simulation reads or writes lives in [`GameState`].
//! Renderers only look at it through the slice views at the bottom.

use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Satellite, Wall};
use super::asteroid::{Asteroid, AsteroidField};
use super::bullet::Bullet;
use super::camera::Camera;
use super::explosion::{Explosion, ExplosionManager};
use super::ship::Ship;
use crate::assets::AssetRegistry;
use crate::model::MeshData;
use crate::tuning::Tuning;

/// Something notable that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new wave of `count` asteroids was launched
    WaveLaunched { count: u32 },
    /// An asteroid rammed the ship
    ShipDestroyed { position: Vec3 },
    /// The ship flew into wall `wall`
    ShipHitWall { wall: usize },
    AsteroidDestroyed { id: u32, position: Vec3 },
    /// The player pressed reset
    ManualReset,
}

/// Running totals for the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub resets: u32,
    pub waves_launched: u32,
    pub asteroids_destroyed: u32,
    pub bullets_fired: u32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub ship: Ship,
    pub arena: Arena,
    pub asteroid_field: AsteroidField,
    pub explosions: ExplosionManager,
    pub satellite: Satellite,
    pub camera: Camera,
    /// Seconds simulated so far
    pub time_secs: f32,
    /// Ticks simulated so far
    pub frame: u64,
    /// Events from the most recent tick only
    pub events: Vec<GameEvent>,
    pub stats: GameStats,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session seeded from `tuning.seed`. No asteroids yet; the first
    /// tick launches the opening wave.
    pub fn new(tuning: Tuning, assets: &AssetRegistry, ship_mesh: Arc<MeshData>) -> Self {
        let rng = Pcg32::seed_from_u64(tuning.seed);
        let mut state = Self {
            ship: Ship::new(&tuning, assets, ship_mesh),
            arena: Arena::new(tuning.arena_dim),
            asteroid_field: AsteroidField::new(&tuning, assets),
            explosions: ExplosionManager::new(&tuning),
            satellite: Satellite::default(),
            camera: Camera::default(),
            time_secs: 0.0,
            frame: 0,
            events: Vec::new(),
            stats: GameStats::default(),
            rng,
            tuning,
        };
        state.camera.follow(&state.ship);
        state
    }

    /// Put the ship back at the origin and clear the asteroid field.
    /// Explosions keep playing.
    pub fn reset(&mut self) {
        self.ship.reset();
        self.asteroid_field.reset();
        self.arena.reset_colours();
        self.stats.resets += 1;
        log::info!(
            "Game reset at t={:.2}s ({} resets so far)",
            self.time_secs,
            self.stats.resets
        );
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        self.asteroid_field.asteroids()
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.ship.bullets().bullets()
    }

    pub fn walls(&self) -> &[Wall] {
        self.arena.walls()
    }

    pub fn explosions(&self) -> &[Explosion] {
        self.explosions.explosions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(
            Tuning::default(),
            &AssetRegistry::with_placeholder_handles(),
            Arc::new(MeshData::placeholder_ship()),
        )
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = state();
        assert!(state.asteroids().is_empty());
        assert!(state.bullets().is_empty());
        assert!(state.explosions().is_empty());
        assert_eq!(state.walls().len(), 6);
        assert_eq!(state.ship().position, Vec3::ZERO);
    }

    #[test]
    fn test_reset_keeps_explosions() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(1);
        state.explosions.populate(Vec3::ONE, &mut rng);
        state.ship.position = Vec3::new(5.0, 5.0, 5.0);
        state.ship.shoot();

        state.reset();

        assert_eq!(state.explosions().len(), 1);
        assert_eq!(state.ship().position, Vec3::ZERO);
        assert!(state.bullets().is_empty());
        assert_eq!(state.stats.resets, 1);
    }
}
