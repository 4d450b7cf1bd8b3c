//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed and the same sequence
//! of inputs and frame deltas, a run is reproduced exactly:
//! - Seeded RNG only
//! - Stable iteration order (live sets only reorder on deletion)
//! - No rendering or platform dependencies

pub mod arena;
pub mod asteroid;
pub mod body;
pub mod bullet;
pub mod camera;
pub mod collision;
pub mod explosion;
pub mod math;
pub mod ship;
pub mod state;
pub mod tick;

pub use arena::{Arena, Satellite, Wall, WallColour};
pub use asteroid::{ArenaPresence, Asteroid, AsteroidField};
pub use body::Body;
pub use bullet::{Bullet, BulletStream};
pub use camera::{Camera, Look};
pub use explosion::{Explosion, ExplosionManager};
pub use ship::{Axis, Ship, Thrust};
pub use state::{GameEvent, GameState, GameStats};
pub use tick::{TickInput, tick};
