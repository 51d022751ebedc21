//! Combat tuning

use serde::{Deserialize, Serialize};

/// Damage, health and reward constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage to the player per tick of enemy contact
    pub contact_damage: i32,
    /// Damage to an enemy per projectile hit
    pub projectile_damage: i32,
    /// Health of a freshly spawned enemy
    pub enemy_health: i32,
    pub player_max_health: i32,
    /// Invincibility granted to the player after a contact hit, seconds
    pub hit_invincibility: f32,
    /// Score for each enemy killed
    pub score_per_kill: u32,
    /// Ammo for each enemy killed
    pub ammo_per_kill: u32,
    /// Probability that a kill drops a healing item
    pub heal_drop_chance: f32,
    /// Ammo the player starts a level with
    pub starting_ammo: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            contact_damage: 20,
            projectile_damage: 20,
            enemy_health: 100,
            player_max_health: 100,
            hit_invincibility: 0.0,
            score_per_kill: 1,
            ammo_per_kill: 5,
            heal_drop_chance: 0.05,
            starting_ammo: 30,
        }
    }
}

impl CombatConfig {
    pub fn with_contact_damage(mut self, damage: i32) -> Self {
        self.contact_damage = damage;
        self
    }

    pub fn with_projectile_damage(mut self, damage: i32) -> Self {
        self.projectile_damage = damage;
        self
    }

    pub fn with_enemy_health(mut self, health: i32) -> Self {
        self.enemy_health = health;
        self
    }

    pub fn with_hit_invincibility(mut self, seconds: f32) -> Self {
        self.hit_invincibility = seconds;
        self
    }

    pub fn with_heal_drop_chance(mut self, chance: f32) -> Self {
        self.heal_drop_chance = chance;
        self
    }

    pub fn with_starting_ammo(mut self, ammo: u32) -> Self {
        self.starting_ammo = ammo;
        self
    }
}
