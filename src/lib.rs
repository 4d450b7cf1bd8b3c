//! Asteroid Arena - simulation core for a 3D arena asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `platform`: Input and timing sources fed in by the host loop
//! - `assets`: Texture handle registry
//! - `model`: Ship mesh data handed over at startup
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod error;
pub mod model;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use assets::{AssetRegistry, EntityKind, TextureId};
pub use error::Error;
pub use model::MeshData;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Most are defaults for [`Tuning`]. The satellite, camera and frame-delta
/// values are fixed and read directly rather than through [`Tuning`].
pub mod consts {
    /// Half-extent of the arena cube
    pub const ARENA_DIM: f32 = 400.0;
    /// Clearance beyond its own radius an asteroid needs from every wall to count as inside
    pub const ARENA_INSIDE_MARGIN: f32 = 0.5;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 200.0;
    pub const SHIP_FIRE_RATE: f32 = 0.2; // seconds between shots
    pub const WARNING_RADIUS: f32 = 200.0;
    pub const COLLISION_RADIUS: f32 = 5.0;
    /// Degrees per second at full mouse deflection
    pub const MOUSE_ROTATION_SPEED: f32 = 40.0;
    /// Degrees per second while A/D is held
    pub const BARREL_ROLL_SPEED: f32 = 100.0;

    pub const BULLET_SPEED: f32 = 600.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_SPEED: f32 = 20.0;
    pub const ASTEROID_MAX_SPEED: f32 = 60.0;
    pub const ASTEROID_BASE_RADIUS: f32 = 10.0;
    pub const ASTEROID_MIN_SCALE: f32 = 1.0;
    pub const ASTEROID_MAX_SCALE: f32 = 3.0;
    pub const ASTEROID_HEALTH: i32 = 3;
    pub const INITIAL_ASTEROID_COUNT: u32 = 10;
    /// Seconds before a new wave joins an unfinished one
    pub const TIME_BETWEEN_LEVELS: f32 = 20.0;
    /// Consecutive frames outside the arena before an asteroid is dropped
    pub const ESCAPE_DEBOUNCE_FRAMES: u32 = 2;

    /// Explosion defaults
    pub const EXPLOSION_LIFETIME: f32 = 1.5;
    pub const EXPLOSION_DEBRIS: usize = 24;
    pub const EXPLOSION_DEBRIS_SPEED: f32 = 40.0;

    /// Satellite orbit (arena decoration / light source). Not tunable.
    pub const SATELLITE_ORBIT_RADIUS: f32 = 1200.0;
    pub const SATELLITE_SPEED: f32 = 10.0; // degrees per second

    /// Camera offsets from the ship. Not tunable.
    pub const CAMERA_DISTANCE: f32 = 60.0;
    pub const CAMERA_RAISE: f32 = 10.0;

    /// Largest frame delta accepted from the timing source (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
