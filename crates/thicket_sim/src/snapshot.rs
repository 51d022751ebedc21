//! Read-only view of the world handed to the renderer after each tick

use crate::level::{Level, LevelKind};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use thicket_ai::EnemyState;
use thicket_math::Vec3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub health: i32,
    pub max_health: i32,
    pub invincible: bool,
    pub ammo: u32,
    pub healing_items: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    /// Handle bits, stable while the enemy lives
    pub id: u64,
    pub position: Vec3,
    pub state: EnemyState,
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Vec3,
    pub radius: f32,
}

/// Post-tick world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub level: Option<LevelKind>,
    pub terrain_texture: Option<String>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
}

impl RenderSnapshot {
    pub fn capture(tick: u64, player: &Player, level: Option<&Level>) -> Self {
        let player = PlayerView {
            position: player.position(),
            health: player.health.current,
            max_health: player.health.max,
            invincible: player.is_invincible(),
            ammo: player.ammo,
            healing_items: player.healing_items,
            score: player.score,
        };

        let Some(level) = level else {
            return Self {
                tick,
                level: None,
                terrain_texture: None,
                player,
                enemies: Vec::new(),
                projectiles: Vec::new(),
            };
        };

        Self {
            tick,
            level: Some(level.kind()),
            terrain_texture: Some(level.config().terrain_texture.clone()),
            player,
            enemies: level
                .enemies
                .iter()
                .map(|(handle, enemy)| EnemyView {
                    id: handle.to_bits(),
                    position: enemy.position(),
                    state: enemy.state(),
                    health: enemy.health.current,
                })
                .collect(),
            projectiles: level
                .projectiles
                .iter()
                .map(|(handle, projectile)| ProjectileView {
                    id: handle.to_bits(),
                    position: projectile.position(),
                    radius: projectile.radius,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Projectile;
    use crate::level::LevelConfig;
    use thicket_combat::CombatConfig;

    #[test]
    fn test_capture_without_level() {
        let player = Player::new(Vec3::splat(0.5), &CombatConfig::default());
        let snapshot = RenderSnapshot::capture(4, &player, None);

        assert_eq!(snapshot.level, None);
        assert!(snapshot.enemies.is_empty());
        assert_eq!(snapshot.player.health, 100);
    }

    #[test]
    fn test_capture_level() {
        let player = Player::new(Vec3::splat(0.5), &CombatConfig::default());
        let mut level = Level::new(LevelConfig::desert());
        let enemy = level.spawn_enemy(Vec3::new(1.0, 0.0, 2.0), 100);
        level.add_projectile(Projectile::new(Vec3::Y, Vec3::Z, 0.029));

        let snapshot = RenderSnapshot::capture(9, &player, Some(&level));

        assert_eq!(snapshot.level, Some(LevelKind::Desert));
        assert_eq!(snapshot.terrain_texture.as_deref(), Some("sand"));
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(snapshot.enemies[0].id, enemy.to_bits());
        assert_eq!(snapshot.enemies[0].state, EnemyState::Idle);
        assert_eq!(snapshot.projectiles[0].radius, 0.029);

        let json = snapshot.to_json().unwrap();
        let parsed: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
