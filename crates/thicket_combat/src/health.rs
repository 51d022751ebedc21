//! Health component and management

use crate::damage::DamageInfo;
use serde::{Deserialize, Serialize};

/// Health of a player or enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    /// Current health; the owner is dead at zero
    pub current: i32,
    /// Maximum health
    pub max: i32,
    /// Remaining invincibility time
    #[serde(skip)]
    pub invulnerability_timer: f32,
    /// Invincibility granted after taking damage (i-frames). Zero means every
    /// hit lands.
    pub invulnerability_on_hit: f32,
}

impl Health {
    /// Create a new health component at full health
    pub fn new(max_health: i32) -> Self {
        Self {
            current: max_health,
            max: max_health,
            invulnerability_timer: 0.0,
            invulnerability_on_hit: 0.0,
        }
    }

    /// Set invulnerability time after hit
    pub fn with_invulnerability_on_hit(mut self, duration: f32) -> Self {
        self.invulnerability_on_hit = duration;
        self
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_timer > 0.0
    }

    /// Grant an invincibility window, never shortening one already running
    pub fn make_invulnerable(&mut self, duration: f32) {
        self.invulnerability_timer = self.invulnerability_timer.max(duration);
    }

    /// Apply damage to this health component.
    /// Returns the actual damage dealt and whether this hit killed.
    pub fn apply_damage(&mut self, damage: &DamageInfo) -> (i32, bool) {
        if self.is_dead() || self.is_invulnerable() {
            return (0, false);
        }

        let before = self.current;
        self.current = (self.current - damage.amount.max(0)).max(0);

        if self.invulnerability_on_hit > 0.0 {
            self.invulnerability_timer = self.invulnerability_on_hit;
        }

        (before - self.current, self.is_dead())
    }

    /// Heal the entity.
    /// Returns the actual amount healed
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_dead() {
            return 0;
        }

        let old_health = self.current;
        self.current = (self.current + amount.max(0)).min(self.max);
        self.current - old_health
    }

    /// Restore to maximum
    pub fn heal_full(&mut self) -> i32 {
        self.heal(self.max)
    }

    /// Set health directly (clamped to 0..max)
    pub fn set_health(&mut self, health: i32) {
        self.current = health.clamp(0, self.max);
    }

    /// Count down the invincibility window (call once per tick)
    pub fn update(&mut self, delta_time: f32) {
        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer = (self.invulnerability_timer - delta_time).max(0.0);
        }
    }

    /// Back to full health with no invincibility running
    pub fn reset(&mut self) {
        self.current = self.max;
        self.invulnerability_timer = 0.0;
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}
