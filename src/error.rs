//! Crate-level error type
//!
//! Only startup can fail. Gameplay collisions are state transitions, not errors.

use thiserror::Error;

use crate::model::MeshError;
use crate::tuning::ConfigError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
