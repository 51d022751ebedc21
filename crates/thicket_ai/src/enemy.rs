//! Enemy behaviour: idle, attack, losing sight

use crate::state_machine::{State, StateMachine, TransitionTable};
use serde::{Deserialize, Serialize};
use thicket_math::Vec3;

/// Behavioural state of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Standing still, waiting for the player to come near
    #[default]
    Idle,
    /// Chasing the player
    Attack,
    /// Player slipped into the hysteresis band; still chasing
    LosingSight,
}

impl EnemyState {
    /// Whether an enemy in this state accelerates toward the player
    pub fn pursues(&self) -> bool {
        matches!(self, Self::Attack | Self::LosingSight)
    }
}

impl State for EnemyState {}

/// Per-enemy state machine cursor
pub type EnemyBrain = StateMachine<EnemyState>;

/// AI tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Squared horizontal distance below which an enemy notices the player
    pub near_distance_sq: f32,
    /// Squared horizontal distance beyond which a chasing enemy gives up
    pub far_distance_sq: f32,
    /// Velocity gained per second while pursuing, before the speed modifier
    pub pursuit_rate: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            near_distance_sq: 400.0,
            far_distance_sq: 1225.0,
            pursuit_rate: 3.0,
        }
    }
}

impl AiConfig {
    /// Set both thresholds from plain (unsquared) distances
    pub fn with_distances(mut self, near: f32, far: f32) -> Self {
        self.near_distance_sq = near * near;
        self.far_distance_sq = far * far;
        self
    }

    pub fn with_pursuit_rate(mut self, rate: f32) -> Self {
        self.pursuit_rate = rate;
        self
    }

    /// NEAR must sit strictly below FAR for the hysteresis band to exist
    pub fn has_hysteresis_band(&self) -> bool {
        self.near_distance_sq < self.far_distance_sq
    }
}

/// What an enemy knows about the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// Squared distance with the vertical axis ignored
    pub distance_sq: f32,
    /// Horizontal unit vector toward the player (zero when on top of them)
    pub direction: Vec3,
}

impl Sighting {
    pub fn between(enemy: Vec3, player: Vec3) -> Self {
        let offset = (player - enemy).horizontal();
        Self {
            distance_sq: offset.length_squared(),
            direction: offset.normalize_or_zero(),
        }
    }
}

/// Shared enemy controller. Holds the transition rules; each enemy carries
/// only its own [`EnemyBrain`].
pub struct EnemyAi {
    config: AiConfig,
    table: TransitionTable<EnemyState, Sighting>,
}

impl EnemyAi {
    pub fn new(config: AiConfig) -> Self {
        let near = config.near_distance_sq;
        let far = config.far_distance_sq;

        let mut table = TransitionTable::new();
        table.add_transition(EnemyState::Idle, EnemyState::Attack, move |s: &Sighting| {
            s.distance_sq < near
        });
        table.add_transition(EnemyState::Attack, EnemyState::LosingSight, move |s: &Sighting| {
            s.distance_sq > near && s.distance_sq < far
        });
        table.add_transition(EnemyState::LosingSight, EnemyState::Attack, move |s: &Sighting| {
            s.distance_sq < near
        });
        table.add_transition(EnemyState::LosingSight, EnemyState::Idle, move |s: &Sighting| {
            s.distance_sq > far
        });

        Self { config, table }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Run one tick of behaviour for an enemy.
    ///
    /// Evaluates at most one transition, then returns the velocity change the
    /// enemy should apply this tick. The motion follows the state the enemy
    /// was in when the tick began: an enemy that only just noticed the player
    /// starts moving on the next tick, and one that just gave up still takes
    /// this tick's step.
    pub fn think(
        &self,
        brain: &mut EnemyBrain,
        enemy_position: Vec3,
        player_position: Vec3,
        speed_modifier: f32,
        dt: f32,
    ) -> Vec3 {
        let sighting = Sighting::between(enemy_position, player_position);
        let acting = *brain.current();

        if let Some(next) = brain.update(&self.table, &sighting) {
            log::debug!(
                "enemy at ({:.1}, {:.1}) {:?} -> {:?} (d2 = {:.1})",
                enemy_position.x,
                enemy_position.z,
                acting,
                next,
                sighting.distance_sq
            );
        }

        if acting.pursues() {
            sighting.direction * (self.config.pursuit_rate * speed_modifier * dt)
        } else {
            Vec3::ZERO
        }
    }
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

impl std::fmt::Debug for EnemyAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyAi").field("config", &self.config).finish()
    }
}
