//! Game balance values
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! re-balanced from a JSON file without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors reading a tuning file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Arena ===
    pub arena_dim: f32,
    pub escape_debounce_frames: u32,

    // === Ship ===
    pub ship_speed: f32,
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub warning_radius: f32,
    pub collision_radius: f32,
    pub mouse_rotation_speed: f32,
    pub barrel_roll_speed: f32,

    // === Asteroids ===
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_base_radius: f32,
    pub asteroid_min_scale: f32,
    pub asteroid_max_scale: f32,
    pub asteroid_health: i32,
    pub initial_asteroid_count: u32,
    pub time_between_levels: f32,

    // === Effects ===
    pub explosion_lifetime: f32,
    pub explosion_debris: usize,
    pub explosion_debris_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            arena_dim: ARENA_DIM,
            escape_debounce_frames: ESCAPE_DEBOUNCE_FRAMES,

            ship_speed: SHIP_SPEED,
            fire_rate: SHIP_FIRE_RATE,
            bullet_speed: BULLET_SPEED,
            warning_radius: WARNING_RADIUS,
            collision_radius: COLLISION_RADIUS,
            mouse_rotation_speed: MOUSE_ROTATION_SPEED,
            barrel_roll_speed: BARREL_ROLL_SPEED,

            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_base_radius: ASTEROID_BASE_RADIUS,
            asteroid_min_scale: ASTEROID_MIN_SCALE,
            asteroid_max_scale: ASTEROID_MAX_SCALE,
            asteroid_health: ASTEROID_HEALTH,
            initial_asteroid_count: INITIAL_ASTEROID_COUNT,
            time_between_levels: TIME_BETWEEN_LEVELS,

            explosion_lifetime: EXPLOSION_LIFETIME,
            explosion_debris: EXPLOSION_DEBRIS,
            explosion_debris_speed: EXPLOSION_DEBRIS_SPEED,
        }
    }
}

impl Tuning {
    /// Radius of the sphere circumscribing the arena cube (asteroid spawn shell)
    pub fn arena_radius(&self) -> f32 {
        (3.0 * self.arena_dim * self.arena_dim).sqrt()
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to defaults when the file is unusable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_dim <= ARENA_INSIDE_MARGIN {
            return Err(ConfigError::Invalid(format!("arena_dim {}", self.arena_dim)));
        }
        if self.asteroid_base_radius <= 0.0 || self.asteroid_min_scale <= 0.0 {
            return Err(ConfigError::Invalid("asteroid radius must be positive".into()));
        }
        if self.asteroid_min_scale > self.asteroid_max_scale {
            return Err(ConfigError::Invalid("asteroid scale range is inverted".into()));
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::Invalid("asteroid speed range is inverted".into()));
        }
        if self.fire_rate < 0.0 || self.time_between_levels <= 0.0 {
            return Err(ConfigError::Invalid("timers must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_radius_circumscribes_cube() {
        let tuning = Tuning::default();
        let corner = glam::Vec3::splat(tuning.arena_dim);
        assert!((tuning.arena_radius() - corner.length()).abs() < 0.01);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "seed": 7, "fire_rate": 0.5 }"#).unwrap();
        assert_eq!(tuning.seed, 7);
        assert_eq!(tuning.fire_rate, 0.5);
        assert_eq!(tuning.arena_dim, ARENA_DIM);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let result = Tuning::from_json(r#"{ "asteroid_min_speed": 90.0, "asteroid_max_speed": 10.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Tuning::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load("/definitely/not/here.json");
        assert_eq!(tuning, Tuning::default());
    }
}
