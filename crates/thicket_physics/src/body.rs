//! Motion state shared by every moving entity

use crate::config::PhysicsConfig;
use thicket_math::{Segment, Vec3, AABB};

/// Position, orientation and velocity of a moving entity
#[derive(Debug, Clone, PartialEq)]
pub struct MotionBody {
    /// World position
    pub position: Vec3,
    /// Euler rotation in radians; orients motion only, never collision
    pub rotation: Vec3,
    /// Velocity, units per second. Persists across ticks.
    pub velocity: Vec3,
    /// Sum of the velocity changes pushed this tick
    pub acceleration: Vec3,
    /// Whether gravity pulls on this body
    pub affected_by_gravity: bool,
    /// Advisory speed cap reported to consumers; the integrator never clamps to it
    pub max_speed: f32,
}

impl MotionBody {
    /// Resting body at a position, not affected by gravity
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            affected_by_gravity: false,
            max_speed: f32::INFINITY,
        }
    }

    /// Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set gravity flag
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Set the advisory speed cap
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Clear the per-tick acceleration record. Called before the owning
    /// behavior issues this tick's commands.
    #[inline]
    pub fn begin_tick(&mut self) {
        self.acceleration = Vec3::ZERO;
    }

    /// Add `delta` to the velocity
    #[inline]
    pub fn accelerate(&mut self, delta: Vec3) {
        self.velocity += delta;
        self.acceleration += delta;
    }

    /// Advance one tick.
    ///
    /// Gravity (if enabled) is taken off the vertical velocity first, then the
    /// position moves by `velocity * dt`. Returns the path travelled this tick.
    pub fn integrate(&mut self, dt: f32, config: &PhysicsConfig) -> Segment {
        let previous = self.position;
        if self.affected_by_gravity {
            self.velocity.y -= config.gravity * dt;
        }
        self.position += self.velocity * dt;
        Segment::new(previous, self.position)
    }

    /// Clamp the position into the box. Velocity is left untouched.
    pub fn clamp_to_bounds(&mut self, bounds: &AABB) {
        self.position = bounds.closest_point(self.position);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether the body is moving faster than its advisory cap
    #[inline]
    pub fn is_over_speed(&self) -> bool {
        self.speed() > self.max_speed
    }
}

impl Default for MotionBody {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accelerate_adds_exactly() {
        let mut body = MotionBody::at(Vec3::ZERO).with_velocity(Vec3::new(1.0, 2.0, 3.0));
        let a = Vec3::new(3.0, 0.0, -4.0);
        let dt = 0.25;

        body.accelerate(a * dt);

        assert_eq!(body.velocity, Vec3::new(1.0, 2.0, 3.0) + a * dt);
        assert_eq!(body.acceleration, a * dt);
    }

    #[test]
    fn test_integrate_has_no_damping() {
        let config = PhysicsConfig::default();
        let mut body = MotionBody::at(Vec3::ZERO).with_velocity(Vec3::new(2.0, 0.0, 0.0));

        for _ in 0..100 {
            body.integrate(0.016, &config);
        }

        assert_eq!(body.velocity, Vec3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(body.position.x, 3.2, epsilon = 1e-4);
    }

    #[test]
    fn test_gravity_applied_before_move() {
        let config = PhysicsConfig::default().with_gravity(10.0);
        let mut body = MotionBody::at(Vec3::ZERO).with_gravity(true);

        let path = body.integrate(0.5, &config);

        assert_relative_eq!(body.velocity.y, -5.0);
        assert_relative_eq!(body.position.y, -2.5);
        assert_eq!(path.start, Vec3::ZERO);
        assert_eq!(path.end, body.position);
    }

    #[test]
    fn test_no_terminal_velocity() {
        let config = PhysicsConfig::default();
        let mut body = MotionBody::at(Vec3::ZERO).with_gravity(true).with_max_speed(1.0);

        for _ in 0..600 {
            body.integrate(1.0 / 60.0, &config);
        }

        assert_relative_eq!(body.velocity.y, -config.gravity * 10.0, epsilon = 1e-2);
        assert!(body.is_over_speed());
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = AABB::new(Vec3::new(-100.0, 0.0, -100.0), Vec3::new(60.0, 50.0, 60.0));
        let mut body = MotionBody::at(Vec3::new(70.0, -3.0, -20.0)).with_velocity(Vec3::X);

        body.clamp_to_bounds(&bounds);

        assert_eq!(body.position, Vec3::new(60.0, 0.0, -20.0));
        assert_eq!(body.velocity, Vec3::X);
    }

    #[test]
    fn test_begin_tick_resets_acceleration_only() {
        let mut body = MotionBody::default();
        body.accelerate(Vec3::Z);
        body.begin_tick();

        assert_eq!(body.acceleration, Vec3::ZERO);
        assert_eq!(body.velocity, Vec3::Z);
    }
}
