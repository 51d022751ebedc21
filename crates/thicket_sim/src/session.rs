//! The session: one player, at most one active level, and the tick loop

use crate::collision::{self, Resolution};
use crate::config::SimConfig;
use crate::entity::{Enemy, Projectile};
use crate::error::{Result, SimError};
use crate::feedback::{FeedbackSink, NullFeedback};
use crate::input::TickInput;
use crate::level::{Level, LevelKind};
use crate::player::Player;
use crate::snapshot::RenderSnapshot;
use serde::{Deserialize, Serialize};
use thicket_ai::EnemyAi;
use thicket_core::{Handle, RandomSource, SeededRandom};
use thicket_math::Vec3;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No level loaded
    #[default]
    Idle,
    /// A level is loaded and ticking
    Playing,
    /// The player died; the level has been unloaded
    GameOver,
}

impl SessionPhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// A healing item was used
    pub healed: bool,
    /// Projectile launched by this tick's fire command
    pub fired: Option<Handle<Projectile>>,
    /// Enemy created by the spawn roll
    pub spawned: Option<Handle<Enemy>>,
    /// Projectiles dropped for falling below the floor
    pub projectiles_expired: u32,
    pub resolution: Resolution,
    pub game_over: bool,
    /// Score at the moment of death
    pub final_score: Option<u32>,
}

impl TickReport {
    /// Report for a tick in which nothing ran
    pub fn idle(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }
}

/// Owns all mutable simulation state and advances it one tick at a time
pub struct Session {
    config: SimConfig,
    ai: EnemyAi,
    player: Player,
    level: Option<Level>,
    phase: SessionPhase,
    feedback: Box<dyn FeedbackSink>,
    rng: Box<dyn RandomSource>,
    ticks: u64,
}

impl Session {
    /// Create a session with no level loaded, a silent feedback sink and a
    /// random source seeded with 0
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ai: EnemyAi::new(config.ai.clone()),
            player: Player::new(config.player_half_extents, &config.combat),
            level: None,
            phase: SessionPhase::Idle,
            feedback: Box::new(NullFeedback),
            rng: Box::new(SeededRandom::new(0)),
            ticks: 0,
            config,
        })
    }

    pub fn with_random<R: RandomSource + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_feedback<F: FeedbackSink + 'static>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Ticks run so far, including idle ones
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Result<&mut Level> {
        self.level.as_mut().ok_or(SimError::NoActiveLevel)
    }

    /// Load (or switch to) a level. Clears every enemy and projectile and
    /// resets the player.
    pub fn load_level(&mut self, kind: LevelKind) -> Result<()> {
        let config = self
            .config
            .level(kind)
            .cloned()
            .ok_or(SimError::UnknownLevel(kind))?;

        match self.level.as_mut() {
            Some(level) => {
                log::info!("switching level {:?} -> {:?}", level.kind(), kind);
                level.reload(config);
            }
            None => {
                log::info!("loading level {:?}", kind);
                self.level = Some(Level::new(config));
            }
        }
        self.player.reset();
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Drop the active level, if any
    pub fn unload_level(&mut self) {
        if let Some(level) = self.level.take() {
            log::info!("unloaded level {:?}", level.kind());
        }
        self.phase = SessionPhase::Idle;
    }

    pub fn enemy(&self, handle: Handle<Enemy>) -> Result<&Enemy> {
        self.level
            .as_ref()
            .ok_or(SimError::NoActiveLevel)?
            .enemies
            .get(handle)
            .ok_or(SimError::UnknownEnemy(handle))
    }

    /// Place an enemy outside the spawn roll
    pub fn spawn_enemy(&mut self, position: Vec3) -> Result<Handle<Enemy>> {
        let health = self.config.combat.enemy_health;
        Ok(self.level_mut()?.spawn_enemy(position, health))
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) -> Result<Handle<Projectile>> {
        Ok(self.level_mut()?.add_projectile(projectile))
    }

    /// Advance the world by `dt` seconds.
    ///
    /// Order: input, player, enemies (AI then motion), spawn roll,
    /// projectiles, collision and resolution, then the game-over check.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickReport {
        self.ticks += 1;
        let tick = self.ticks;

        let Some(level) = self.level.as_mut() else {
            return TickReport::idle(tick);
        };
        let mut report = TickReport::idle(tick);
        let physics = &self.config.physics;

        // Input
        report.healed = input.use_heal && self.player.use_healing_item();
        self.player.body.begin_tick();
        self.player.body.accelerate(input.player_acceleration);
        if let Some(fire) = &input.fire {
            if self.player.consume_ammo() {
                let projectile = Projectile::new(
                    fire.origin,
                    fire.launch_velocity(self.config.projectile.muzzle_speed, self.config.projectile.muzzle_drop),
                    self.config.projectile.radius,
                );
                report.fired = Some(level.add_projectile(projectile));
                self.feedback.on_player_fire();
            }
        }

        // Player
        let world_bounds = *level.world_bounds();
        self.player.update(&world_bounds, physics, dt);
        let player_position = self.player.position();

        // Enemies
        for enemy in level.enemies.values_mut() {
            enemy.update(&self.ai, player_position, &world_bounds, physics, dt);
        }
        debug_assert!(level.enemies.values().all(Enemy::bounds_in_sync));

        report.spawned = level.roll_spawn(&mut *self.rng, self.config.combat.enemy_health, dt);

        // Projectiles
        for projectile in level.projectiles.values_mut() {
            projectile.update(physics, dt);
        }
        report.projectiles_expired = level
            .projectiles
            .drain_where(|_, projectile| projectile.below_floor())
            .len() as u32;

        report.resolution = collision::resolve(
            level,
            &mut self.player,
            &self.config.combat,
            &mut *self.feedback,
            &mut *self.rng,
        );
        log::trace!(
            "tick {}: {} enemies, {} projectiles, health {}",
            tick,
            level.enemies.len(),
            level.projectiles.len(),
            self.player.health.current
        );

        if self.player.is_dead() {
            log::info!("game over on tick {} with score {}", tick, self.player.score);
            self.level = None;
            self.phase = SessionPhase::GameOver;
            report.game_over = true;
            report.final_score = Some(self.player.score);
        }

        report
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self.ticks, &self.player, self.level.as_ref())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("ticks", &self.ticks)
            .field("player", &self.player)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
