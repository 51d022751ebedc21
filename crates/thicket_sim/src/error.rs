//! Simulation errors
//!
//! Ticking never fails. These cover the edges where outside callers hand the
//! session something it cannot use: a bad configuration, a level that is not
//! in the table, or a handle that no longer names a live enemy.

use crate::entity::Enemy;
use crate::level::LevelKind;
use thicket_core::Handle;
use thiserror::Error;

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration parsed but is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Operation needs a loaded level
    #[error("No active level")]
    NoActiveLevel,
    /// Level kind missing from the level table
    #[error("Unknown level: {0:?}")]
    UnknownLevel(LevelKind),
    /// Handle does not name a live enemy
    #[error("Unknown enemy: {0:?}")]
    UnknownEnemy(Handle<Enemy>),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SimError>;
