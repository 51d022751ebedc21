//! Per-tick input from the host
//!
//! The simulation never polls devices. The host collects whatever the player
//! did since the last tick and hands it over as a [`TickInput`].

use serde::{Deserialize, Serialize};
use thicket_math::Vec3;

/// Request to fire one projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireCommand {
    /// Launch position
    pub origin: Vec3,
    /// Aim direction; need not be normalized
    pub direction: Vec3,
}

impl FireCommand {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Launch velocity for the given muzzle speed and drop
    pub fn launch_velocity(&self, muzzle_speed: f32, muzzle_drop: f32) -> Vec3 {
        let mut velocity = self.direction.normalize_or_zero() * muzzle_speed;
        velocity.y -= muzzle_drop;
        velocity
    }
}

/// Everything the player asked for this tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Velocity change requested for the player this tick
    pub player_acceleration: Vec3,
    pub fire: Option<FireCommand>,
    pub use_heal: bool,
}

impl TickInput {
    /// No input at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.player_acceleration = acceleration;
        self
    }

    pub fn with_fire(mut self, origin: Vec3, direction: Vec3) -> Self {
        self.fire = Some(FireCommand::new(origin, direction));
        self
    }

    pub fn with_heal(mut self) -> Self {
        self.use_heal = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_launch_velocity() {
        let fire = FireCommand::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        let v = fire.launch_velocity(40.0, 1.8);

        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, -1.8);
        assert_relative_eq!(v.z, 40.0);
    }
}
