//! The player aggregate

use thicket_combat::{CombatConfig, DamageInfo, DeathReward, Health};
use thicket_math::{Vec3, AABB};
use thicket_physics::{MotionBody, PhysicsConfig};

/// Player state for one session
#[derive(Debug, Clone)]
pub struct Player {
    pub body: MotionBody,
    pub bounds: AABB,
    pub health: Health,
    pub ammo: u32,
    pub healing_items: u32,
    pub score: u32,
    starting_ammo: u32,
}

impl Player {
    pub fn new(half_extents: Vec3, combat: &CombatConfig) -> Self {
        Self {
            body: MotionBody::at(Vec3::ZERO),
            bounds: AABB::from_center_half_extents(Vec3::ZERO, half_extents),
            health: Health::new(combat.player_max_health)
                .with_invulnerability_on_hit(combat.hit_invincibility),
            ammo: combat.starting_ammo,
            healing_items: 0,
            score: 0,
            starting_ammo: combat.starting_ammo,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Back to the start-of-level state
    pub fn reset(&mut self) {
        self.body = MotionBody::at(Vec3::ZERO);
        self.bounds.move_to(Vec3::ZERO);
        self.health.reset();
        self.ammo = self.starting_ammo;
        self.healing_items = 0;
        self.score = 0;
    }

    /// Move to `position` and bring the bounding box along
    pub fn teleport(&mut self, position: Vec3) {
        self.body.position = position;
        self.bounds.move_to(position);
    }

    /// Timers, motion, clamping, box sync
    pub fn update(&mut self, world_bounds: &AABB, physics: &PhysicsConfig, dt: f32) {
        self.health.update(dt);
        self.body.integrate(dt, physics);
        self.body.clamp_to_bounds(world_bounds);
        self.bounds.move_to(self.body.position);
    }

    pub fn is_invincible(&self) -> bool {
        self.health.is_invulnerable()
    }

    /// Grant an invincibility window, e.g. after a respawn
    pub fn set_invincible(&mut self, seconds: f32) {
        self.health.make_invulnerable(seconds);
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Returns the damage actually taken
    pub fn take_damage(&mut self, damage: &DamageInfo) -> i32 {
        let (dealt, died) = self.health.apply_damage(damage);
        if dealt > 0 {
            log::debug!(
                "player took {} {:?} damage, health {}/{}",
                dealt,
                damage.source,
                self.health.current,
                self.health.max
            );
        }
        if died {
            log::debug!("player died");
        }
        dealt
    }

    /// Restore full health from a healing item, if one is held and needed
    pub fn use_healing_item(&mut self) -> bool {
        if self.healing_items == 0 || self.health.is_full() {
            return false;
        }
        self.health.heal_full();
        self.healing_items -= 1;
        true
    }

    /// Spend one round. False when the magazine is empty.
    pub fn consume_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn collect(&mut self, reward: DeathReward) {
        self.score += reward.score;
        self.ammo += reward.ammo;
        self.healing_items += reward.healing_items;
    }
}
