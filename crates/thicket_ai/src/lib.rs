//! Thicket AI - Enemy Behaviour
//!
//! Enemies run a three-state machine driven by their horizontal distance to
//! the player:
//!
//! ```text
//!            d² < NEAR                NEAR < d² < FAR
//!   IDLE ───────────────▶ ATTACK ───────────────────▶ LOSING_SIGHT
//!    ▲                      ▲                              │
//!    │                      └────────── d² < NEAR ─────────┤
//!    └──────────────────────────────── d² > FAR ───────────┘
//! ```
//!
//! The gap between `NEAR` and `FAR` is a hysteresis band: an enemy that has
//! started chasing keeps chasing there instead of flickering back to idle.
//!
//! # Example
//!
//! ```
//! use thicket_ai::prelude::*;
//! use thicket_math::Vec3;
//!
//! let ai = EnemyAi::new(AiConfig::default());
//! let mut brain = EnemyBrain::new(EnemyState::Idle);
//!
//! // 15 units away: close enough to notice
//! ai.think(&mut brain, Vec3::new(15.0, 0.0, 0.0), Vec3::ZERO, 1.0, 0.016);
//! assert!(brain.is_in(&EnemyState::Attack));
//! ```

pub mod enemy;
pub mod state_machine;

pub mod prelude {
    pub use crate::enemy::{AiConfig, EnemyAi, EnemyBrain, EnemyState, Sighting};
    pub use crate::state_machine::{State, StateMachine, Transition, TransitionTable};
}

pub use prelude::*;
