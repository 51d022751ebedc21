//! Thicket Combat - Health, Damage, and Rewards
//!
//! # Features
//!
//! - Integer health with a maximum and an optional invincibility window
//! - Damage tagged with where it came from (contact or projectile)
//! - Kill rewards: score, ammo and a random chance of a healing item
//!
//! # Example
//!
//! ```
//! use thicket_combat::prelude::*;
//!
//! let config = CombatConfig::default();
//! let mut health = Health::new(config.player_max_health);
//!
//! let (dealt, died) = health.apply_damage(&DamageInfo::contact(config.contact_damage));
//! assert_eq!(dealt, 20);
//! assert!(!died);
//! ```

pub mod config;
pub mod damage;
pub mod health;
pub mod reward;

pub mod prelude {
    pub use crate::config::CombatConfig;
    pub use crate::damage::{DamageInfo, DamageSource};
    pub use crate::health::Health;
    pub use crate::reward::DeathReward;
}

pub use prelude::*;
