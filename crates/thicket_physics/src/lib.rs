//! Thicket Physics - Entity Motion Model
//!
//! Every moving thing in the world (player, enemies, projectiles) carries a
//! [`MotionBody`]. A tick for a body is:
//!
//! ```text
//!   begin_tick()        acceleration record cleared
//!   accelerate(delta)   owning behavior (AI, input, shooter) pushes velocity
//!   integrate(dt)       gravity, then position += velocity * dt
//!   clamp_to_bounds()   enemies and the player only
//! ```
//!
//! The model is frictionless and has no terminal velocity: velocity only
//! changes through `accelerate` and gravity.
//!
//! # Example
//!
//! ```
//! use thicket_math::Vec3;
//! use thicket_physics::prelude::*;
//!
//! let config = PhysicsConfig::default();
//! let mut body = MotionBody::at(Vec3::ZERO);
//! body.accelerate(Vec3::new(1.0, 0.0, 0.0));
//! let path = body.integrate(0.5, &config);
//! assert_eq!(path.end, Vec3::new(0.5, 0.0, 0.0));
//! ```

pub mod body;
pub mod config;

pub mod prelude {
    //! Common imports for motion
    pub use crate::body::MotionBody;
    pub use crate::config::PhysicsConfig;
}

pub use prelude::*;
