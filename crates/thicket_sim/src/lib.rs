//! Thicket Sim - World Simulation
//!
//! Owns the live game world and advances it one tick at a time:
//!
//! - Levels with their world bounds, spawn tables and entity collections
//! - The player aggregate (health, ammo, healing items, score)
//! - Enemy behaviour and motion, projectile flight
//! - The collision and resolution pass
//! - A serializable snapshot for the renderer
//!
//! The host owns the window, audio and input devices. It feeds a
//! [`TickInput`] in and reads a [`TickReport`] and a [`RenderSnapshot`] out.
//!
//! # Example
//!
//! ```
//! use thicket_sim::prelude::*;
//!
//! let mut session = Session::new(SimConfig::default())?;
//! session.load_level(LevelKind::Forest)?;
//!
//! let report = session.tick(&TickInput::none(), 1.0 / 60.0);
//! assert!(!report.game_over);
//! # Ok::<(), SimError>(())
//! ```

pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod feedback;
pub mod input;
pub mod level;
pub mod player;
pub mod session;
pub mod snapshot;

pub mod prelude {
    pub use crate::collision::Resolution;
    pub use crate::config::{ProjectileConfig, SimConfig};
    pub use crate::entity::{Enemy, Projectile};
    pub use crate::error::{Result, SimError};
    pub use crate::feedback::{FeedbackSink, NullFeedback};
    pub use crate::input::{FireCommand, TickInput};
    pub use crate::level::{Level, LevelConfig, LevelKind};
    pub use crate::player::Player;
    pub use crate::session::{Session, SessionPhase, TickReport};
    pub use crate::snapshot::{EnemyView, PlayerView, ProjectileView, RenderSnapshot};
}

pub use prelude::*;
