//! Enemies and projectiles

use thicket_ai::{EnemyAi, EnemyBrain, EnemyState};
use thicket_combat::Health;
use thicket_math::{Capsule, Segment, Vec3, AABB};
use thicket_physics::{MotionBody, PhysicsConfig};

/// A hostile entity owned by the active level
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: MotionBody,
    /// Tracks `body.position` at the end of every tick
    pub bounds: AABB,
    pub health: Health,
    pub brain: EnemyBrain,
    /// Multiplier on the pursuit rate, fixed at spawn
    pub speed_modifier: f32,
}

impl Enemy {
    pub fn new(position: Vec3, half_extents: Vec3, health: i32, speed_modifier: f32) -> Self {
        Self {
            body: MotionBody::at(position),
            bounds: AABB::from_center_half_extents(position, half_extents),
            health: Health::new(health),
            brain: EnemyBrain::new(EnemyState::Idle),
            speed_modifier,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn state(&self) -> EnemyState {
        *self.brain.current()
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// One tick of behaviour and motion: think, accelerate, integrate, clamp
    /// to the world, then bring the bounding box along.
    pub fn update(
        &mut self,
        ai: &EnemyAi,
        player_position: Vec3,
        world_bounds: &AABB,
        physics: &PhysicsConfig,
        dt: f32,
    ) {
        self.body.begin_tick();
        let delta = ai.think(
            &mut self.brain,
            self.body.position,
            player_position,
            self.speed_modifier,
            dt,
        );
        self.body.accelerate(delta);
        self.body.integrate(dt, physics);
        self.body.clamp_to_bounds(world_bounds);
        self.sync_bounds();
    }

    /// Re-center the bounding box on the body
    #[inline]
    pub fn sync_bounds(&mut self) {
        self.bounds.move_to(self.body.position);
    }

    /// Whether the bounding box sits on the body's position
    pub fn bounds_in_sync(&self) -> bool {
        (self.bounds.center() - self.body.position).length_squared() <= 1e-6
    }
}

/// A player shot. Falls under gravity and is never clamped to the world.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: MotionBody,
    pub radius: f32,
    /// Where the projectile travelled during the last tick
    pub path: Segment,
}

impl Projectile {
    pub fn new(position: Vec3, velocity: Vec3, radius: f32) -> Self {
        Self {
            body: MotionBody::at(position).with_velocity(velocity).with_gravity(true),
            radius,
            path: Segment::point(position),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Integrate and record the swept segment
    pub fn update(&mut self, physics: &PhysicsConfig, dt: f32) {
        self.body.begin_tick();
        self.path = self.body.integrate(dt, physics);
    }

    /// Volume swept this tick
    pub fn capsule(&self) -> Capsule {
        Capsule::from_segment(self.path, self.radius)
    }

    /// Dropped once it has sunk a full radius below the floor
    pub fn below_floor(&self) -> bool {
        self.body.position.y < -self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world() -> AABB {
        AABB::new(Vec3::new(-100.0, 0.0, -100.0), Vec3::new(60.0, 50.0, 60.0))
    }

    #[test]
    fn test_enemy_spawns_idle_with_box_on_position() {
        let enemy = Enemy::new(Vec3::new(3.0, 0.0, 4.0), Vec3::splat(0.5), 100, 1.0);
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert!(enemy.bounds_in_sync());
        assert_eq!(enemy.bounds.size(), Vec3::ONE);
    }

    #[test]
    fn test_enemy_update_keeps_box_in_sync() {
        let ai = EnemyAi::default();
        let physics = PhysicsConfig::default();
        let mut enemy = Enemy::new(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(0.5), 100, 1.0);
        enemy.brain.force_transition(EnemyState::Attack);

        for _ in 0..30 {
            enemy.update(&ai, Vec3::ZERO, &world(), &physics, 0.016);
            assert!(enemy.bounds_in_sync());
        }
        assert!(enemy.position().x < 10.0);
        assert_eq!(enemy.position().y, 0.0);
    }

    #[test]
    fn test_enemy_clamped_to_world() {
        let ai = EnemyAi::default();
        let physics = PhysicsConfig::default();
        let mut enemy = Enemy::new(Vec3::new(59.9, 0.0, 0.0), Vec3::splat(0.5), 100, 1.0);
        enemy.body.velocity = Vec3::new(100.0, 0.0, 0.0);

        enemy.update(&ai, Vec3::new(59.9, 0.0, 0.0), &world(), &physics, 0.1);

        assert_eq!(enemy.position().x, 60.0);
        assert_eq!(enemy.bounds.center().x, 60.0);
    }

    #[test]
    fn test_projectile_path_and_floor() {
        let physics = PhysicsConfig::default();
        let mut shot = Projectile::new(Vec3::new(0.0, 0.01, 0.0), Vec3::new(0.0, -1.0, 10.0), 0.029);

        shot.update(&physics, 0.01);
        assert_eq!(shot.path.start, Vec3::new(0.0, 0.01, 0.0));
        assert_eq!(shot.path.end, shot.position());
        assert_relative_eq!(shot.position().z, 0.1, epsilon = 1e-6);
        assert!(!shot.below_floor());

        for _ in 0..10 {
            shot.update(&physics, 0.01);
        }
        assert!(shot.below_floor());
    }
}
