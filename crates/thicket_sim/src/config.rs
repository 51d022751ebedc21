//! Simulation configuration
//!
//! Every tunable lives in [`SimConfig`]. The defaults reproduce the shipped
//! game; a JSON file may override any subset of fields.

use crate::error::{Result, SimError};
use crate::level::{LevelConfig, LevelKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use thicket_ai::AiConfig;
use thicket_combat::CombatConfig;
use thicket_math::Vec3;
use thicket_physics::PhysicsConfig;

/// Player projectile settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Projectile radius; also the depth below the floor at which it is dropped
    pub radius: f32,
    /// Launch speed along the aim direction
    pub muzzle_speed: f32,
    /// Downward velocity added at launch
    pub muzzle_drop: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 0.029,
            muzzle_speed: 40.0,
            muzzle_drop: 1.8,
        }
    }
}

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub ai: AiConfig,
    pub combat: CombatConfig,
    pub projectile: ProjectileConfig,
    /// Half extents of the player's bounding box
    pub player_half_extents: Vec3,
    /// Level table, looked up by kind
    pub levels: Vec<LevelConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            ai: AiConfig::default(),
            combat: CombatConfig::default(),
            projectile: ProjectileConfig::default(),
            player_half_extents: Vec3::new(0.5, 1.0, 0.5),
            levels: vec![LevelConfig::forest(), LevelConfig::desert()],
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON from a reader
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_projectile(mut self, projectile: ProjectileConfig) -> Self {
        self.projectile = projectile;
        self
    }

    /// Add a level, replacing any existing entry of the same kind
    pub fn with_level(mut self, level: LevelConfig) -> Self {
        self.levels.retain(|l| l.kind != level.kind);
        self.levels.push(level);
        self
    }

    pub fn level(&self, kind: LevelKind) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.kind == kind)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        if !self.ai.has_hysteresis_band() {
            return invalid(format!(
                "near_distance_sq ({}) must be below far_distance_sq ({})",
                self.ai.near_distance_sq, self.ai.far_distance_sq
            ));
        }
        if self.projectile.radius <= 0.0 {
            return invalid(format!("projectile radius must be positive, got {}", self.projectile.radius));
        }
        if !(0.0..=1.0).contains(&self.combat.heal_drop_chance) {
            return invalid(format!(
                "heal_drop_chance must be within [0, 1], got {}",
                self.combat.heal_drop_chance
            ));
        }
        if self.combat.player_max_health <= 0 || self.combat.enemy_health <= 0 {
            return invalid("health values must be positive".to_string());
        }
        if self.player_half_extents.x <= 0.0
            || self.player_half_extents.y <= 0.0
            || self.player_half_extents.z <= 0.0
        {
            return invalid("player_half_extents must be positive".to_string());
        }

        for (i, level) in self.levels.iter().enumerate() {
            level.validate()?;
            if self.levels[..i].iter().any(|l| l.kind == level.kind) {
                return invalid(format!("level {:?} listed twice", level.kind));
            }
        }

        Ok(())
    }
}
