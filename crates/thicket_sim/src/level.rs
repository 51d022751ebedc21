//! Levels: world bounds, spawn tables and the live entity collections

use crate::entity::{Enemy, Projectile};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use thicket_core::{Handle, HandleMap, RandomSource};
use thicket_math::{Vec3, AABB};

/// Which level is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Forest,
    Desert,
}

/// Everything that distinguishes one level from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub kind: LevelKind,
    /// Playable region; enemies and the player are clamped into it
    pub world_bounds: AABB,
    /// Expected enemy spawns per second
    pub spawn_rate: f32,
    /// Pursuit multiplier given to every enemy spawned here
    pub speed_modifier: f32,
    pub enemy_half_extents: Vec3,
    /// Spawn X and Z are drawn from `[spawn_offset, spawn_offset + spawn_span)`
    /// in whole units
    pub spawn_span: u32,
    pub spawn_offset: f32,
    /// Terrain texture name handed to the renderer
    pub terrain_texture: String,
}

impl LevelConfig {
    fn base(kind: LevelKind, spawn_rate: f32, speed_modifier: f32, texture: &str) -> Self {
        Self {
            kind,
            world_bounds: AABB::new(Vec3::new(-100.0, 0.0, -100.0), Vec3::new(60.0, 50.0, 60.0)),
            spawn_rate,
            speed_modifier,
            enemy_half_extents: Vec3::splat(0.5),
            spawn_span: 80,
            spawn_offset: -60.0,
            terrain_texture: texture.to_string(),
        }
    }

    pub fn forest() -> Self {
        Self::base(LevelKind::Forest, 0.30, 1.25, "grass")
    }

    pub fn desert() -> Self {
        Self::base(LevelKind::Desert, 0.225, 1.0, "sand")
    }

    pub fn for_kind(kind: LevelKind) -> Self {
        match kind {
            LevelKind::Forest => Self::forest(),
            LevelKind::Desert => Self::desert(),
        }
    }

    pub fn with_spawn_rate(mut self, rate: f32) -> Self {
        self.spawn_rate = rate;
        self
    }

    pub fn with_speed_modifier(mut self, modifier: f32) -> Self {
        self.speed_modifier = modifier;
        self
    }

    pub fn with_world_bounds(mut self, bounds: AABB) -> Self {
        self.world_bounds = bounds;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let reject = |what: &str| Err(SimError::InvalidConfig(format!("level {:?}: {}", self.kind, what)));

        if !self.world_bounds.is_valid() {
            return reject("world bounds are inverted");
        }
        if self.spawn_rate < 0.0 {
            return reject("spawn rate is negative");
        }
        let e = self.enemy_half_extents;
        if e.x <= 0.0 || e.y <= 0.0 || e.z <= 0.0 {
            return reject("enemy half extents must be positive");
        }
        Ok(())
    }
}

/// A loaded level and the entities living in it
#[derive(Debug)]
pub struct Level {
    config: LevelConfig,
    pub enemies: HandleMap<Enemy>,
    pub projectiles: HandleMap<Projectile>,
}

impl Level {
    pub fn new(config: LevelConfig) -> Self {
        Self {
            config,
            enemies: HandleMap::new(),
            projectiles: HandleMap::new(),
        }
    }

    pub fn kind(&self) -> LevelKind {
        self.config.kind
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn world_bounds(&self) -> &AABB {
        &self.config.world_bounds
    }

    /// Place a fresh enemy using this level's archetype
    pub fn spawn_enemy(&mut self, position: Vec3, health: i32) -> Handle<Enemy> {
        let enemy = Enemy::new(
            position,
            self.config.enemy_half_extents,
            health,
            self.config.speed_modifier,
        );
        let handle = self.enemies.insert(enemy);
        log::debug!(
            "spawned enemy {:?} at ({:.0}, {:.0}) on {:?}",
            handle,
            position.x,
            position.z,
            self.config.kind
        );
        handle
    }

    /// Once-per-tick spawn roll. Spawns with probability `spawn_rate * dt`.
    ///
    /// Draws one float, and two integers only when the roll succeeds.
    pub fn roll_spawn<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        health: i32,
        dt: f32,
    ) -> Option<Handle<Enemy>> {
        if !rng.roll(self.config.spawn_rate * dt) {
            return None;
        }
        let x = rng.next_int(self.config.spawn_span) as f32 + self.config.spawn_offset;
        let z = rng.next_int(self.config.spawn_span) as f32 + self.config.spawn_offset;
        Some(self.spawn_enemy(Vec3::new(x, 0.0, z), health))
    }

    pub fn add_projectile(&mut self, projectile: Projectile) -> Handle<Projectile> {
        self.projectiles.insert(projectile)
    }

    /// Drop every enemy and projectile. The arenas are kept, so handles
    /// taken before the clear stay dead afterwards.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
    }

    /// Empty the level and take on a new layout
    pub fn reload(&mut self, config: LevelConfig) {
        self.clear();
        self.config = config;
    }
}
