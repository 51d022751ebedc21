//! Collision and resolution pass
//!
//! Runs once per tick after every entity has moved, in a fixed order:
//!
//! 1. Player-enemy contact damage
//! 2. Projectile-enemy hits
//! 3. Enemy death sweep and rewards
//!
//! The order matters: an enemy killed by a projectile in step 2 is still in
//! the collection during step 2 for later projectiles, and only leaves it in
//! step 3.

use crate::entity::Enemy;
use crate::feedback::FeedbackSink;
use crate::level::Level;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use thicket_combat::{CombatConfig, DamageInfo, DeathReward};
use thicket_core::{Handle, HandleMap, RandomSource};
use thicket_math::{aabb_intersects, capsule_vs_aabb_overlap};

/// What the resolution pass did this tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Enemies touching the player while it could be hurt
    pub contacts: u32,
    /// Health the player lost to contact
    pub damage_taken: i32,
    /// Projectiles that hit exactly one enemy and were consumed
    pub hits: u32,
    /// Projectiles overlapping several enemies at once (left untouched)
    pub multi_hits: u32,
    /// Enemies removed by the death sweep
    pub kills: u32,
    /// Sum of the rewards granted for those kills
    pub reward: DeathReward,
}

/// Run the full pass
pub fn resolve(
    level: &mut Level,
    player: &mut Player,
    combat: &CombatConfig,
    feedback: &mut dyn FeedbackSink,
    rng: &mut dyn RandomSource,
) -> Resolution {
    let mut resolution = Resolution::default();
    resolve_contacts(&level.enemies, player, combat, feedback, &mut resolution);
    resolve_projectile_hits(level, combat, &mut resolution);
    sweep_dead_enemies(&mut level.enemies, player, combat, rng, &mut resolution);
    resolution
}

/// Every overlapping enemy deals damage independently; there is no
/// one-hit-per-tick cap beyond the player's own invincibility window.
/// Contacts stop counting once the player is dead.
pub fn resolve_contacts(
    enemies: &HandleMap<Enemy>,
    player: &mut Player,
    combat: &CombatConfig,
    feedback: &mut dyn FeedbackSink,
    resolution: &mut Resolution,
) {
    for (handle, enemy) in enemies.iter() {
        if player.is_dead() {
            break;
        }
        if !aabb_intersects(&enemy.bounds, &player.bounds) || player.is_invincible() {
            continue;
        }
        let damage = DamageInfo::contact(combat.contact_damage).with_source(handle.to_bits());
        resolution.contacts += 1;
        resolution.damage_taken += player.take_damage(&damage);
        feedback.on_player_hurt();
    }
}

/// Test every projectile's swept capsule against every enemy box.
///
/// A projectile overlapping exactly one enemy damages it and is consumed.
/// One overlapping several enemies at once is left alone: no damage, and it
/// stays in flight.
pub fn resolve_projectile_hits(level: &mut Level, combat: &CombatConfig, resolution: &mut Resolution) {
    let Level {
        enemies,
        projectiles,
        ..
    } = level;

    projectiles.drain_where(|shot, projectile| {
        let capsule = projectile.capsule();
        let struck: Vec<Handle<Enemy>> = enemies
            .iter()
            .filter(|(_, enemy)| capsule_vs_aabb_overlap(&capsule, &enemy.bounds))
            .map(|(handle, _)| handle)
            .collect();

        match struck.as_slice() {
            [] => false,
            [target] => {
                let Some(enemy) = enemies.get_mut(*target) else {
                    return false;
                };
                let damage = DamageInfo::projectile(combat.projectile_damage)
                    .with_source(shot.to_bits())
                    .with_hit_point(projectile.position().to_array());
                let (dealt, _) = enemy.health.apply_damage(&damage);
                log::debug!(
                    "projectile {:?} hit enemy {:?} for {}, health {}",
                    shot,
                    target,
                    dealt,
                    enemy.health.current
                );
                resolution.hits += 1;
                true
            }
            _ => {
                log::debug!("projectile {:?} overlaps {} enemies, ignored", shot, struck.len());
                resolution.multi_hits += 1;
                false
            }
        }
    });
}

/// Remove dead enemies and pay out one reward roll per death
pub fn sweep_dead_enemies(
    enemies: &mut HandleMap<Enemy>,
    player: &mut Player,
    combat: &CombatConfig,
    rng: &mut dyn RandomSource,
    resolution: &mut Resolution,
) {
    for (handle, enemy) in enemies.drain_where(|_, enemy| enemy.is_dead()) {
        let reward = DeathReward::roll(combat, rng);
        log::debug!(
            "enemy {:?} died at ({:.1}, {:.1}), reward {:?}",
            handle,
            enemy.position().x,
            enemy.position().z,
            reward
        );
        player.collect(reward);
        resolution.kills += 1;
        resolution.reward = resolution.reward.combine(reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Projectile;
    use crate::feedback::NullFeedback;
    use crate::level::LevelConfig;
    use thicket_math::Vec3;

    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }

        fn next_int(&mut self, _max: u32) -> u32 {
            0
        }
    }

    #[derive(Default)]
    struct Counter {
        hurt: u32,
    }

    impl FeedbackSink for Counter {
        fn on_player_hurt(&mut self) {
            self.hurt += 1;
        }

        fn on_player_fire(&mut self) {}
    }

    fn setup() -> (Level, Player, CombatConfig) {
        let combat = CombatConfig::default();
        let player = Player::new(Vec3::new(0.5, 1.0, 0.5), &combat);
        (Level::new(LevelConfig::forest()), player, combat)
    }

    /// Projectile that travelled `from` -> `to` during the last tick
    fn shot(from: Vec3, to: Vec3) -> Projectile {
        let mut projectile = Projectile::new(to, Vec3::ZERO, 0.03);
        projectile.path = thicket_math::Segment::new(from, to);
        projectile
    }

    #[test]
    fn test_contact_damage_per_enemy() {
        let (mut level, mut player, combat) = setup();
        level.spawn_enemy(Vec3::new(0.5, 0.0, 0.0), 100);
        level.spawn_enemy(Vec3::new(-0.5, 0.0, 0.0), 100);
        level.spawn_enemy(Vec3::new(30.0, 0.0, 0.0), 100);
        let mut feedback = Counter::default();

        let resolution = resolve(&mut level, &mut player, &combat, &mut feedback, &mut Fixed(0.5));

        assert_eq!(resolution.contacts, 2);
        assert_eq!(resolution.damage_taken, 40);
        assert_eq!(player.health.current, 60);
        assert_eq!(feedback.hurt, 2);
    }

    #[test]
    fn test_contacts_stop_once_player_dies() {
        let (mut level, mut player, combat) = setup();
        player.health.set_health(20);
        level.spawn_enemy(Vec3::new(0.5, 0.0, 0.0), 100);
        level.spawn_enemy(Vec3::new(-0.5, 0.0, 0.0), 100);
        level.spawn_enemy(Vec3::new(0.0, 0.0, 0.5), 100);
        let mut feedback = Counter::default();

        let resolution = resolve(&mut level, &mut player, &combat, &mut feedback, &mut Fixed(0.5));

        assert!(player.is_dead());
        assert_eq!(resolution.contacts, 1);
        assert_eq!(resolution.damage_taken, 20);
        assert_eq!(feedback.hurt, 1);
    }

    #[test]
    fn test_invincible_player_untouched() {
        let (mut level, mut player, combat) = setup();
        level.spawn_enemy(Vec3::ZERO, 100);
        player.set_invincible(1.0);
        let mut feedback = Counter::default();

        let resolution = resolve(&mut level, &mut player, &combat, &mut feedback, &mut Fixed(0.5));

        assert_eq!(resolution.contacts, 0);
        assert_eq!(player.health.current, 100);
        assert_eq!(feedback.hurt, 0);
    }

    #[test]
    fn test_hit_invincibility_caps_contacts() {
        let combat = CombatConfig::default().with_hit_invincibility(0.5);
        let mut player = Player::new(Vec3::new(0.5, 1.0, 0.5), &combat);
        let mut level = Level::new(LevelConfig::forest());
        level.spawn_enemy(Vec3::new(0.5, 0.0, 0.0), 100);
        level.spawn_enemy(Vec3::new(-0.5, 0.0, 0.0), 100);

        let resolution = resolve(&mut level, &mut player, &combat, &mut NullFeedback, &mut Fixed(0.5));

        assert_eq!(resolution.contacts, 1);
        assert_eq!(player.health.current, 80);
    }

    #[test]
    fn test_single_hit_consumes_projectile() {
        let (mut level, mut player, combat) = setup();
        let enemy = level.spawn_enemy(Vec3::new(0.0, 0.0, 10.0), 100);
        level.add_projectile(shot(Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.0, 11.0)));
        let far = level.add_projectile(shot(Vec3::new(20.0, 0.0, 0.0), Vec3::new(21.0, 0.0, 0.0)));

        let resolution = resolve(&mut level, &mut player, &combat, &mut NullFeedback, &mut Fixed(0.5));

        assert_eq!(resolution.hits, 1);
        assert_eq!(level.enemies.get(enemy).unwrap().health.current, 80);
        assert_eq!(level.projectiles.len(), 1);
        assert!(level.projectiles.contains(far));
    }

    #[test]
    fn test_multi_hit_is_a_no_op() {
        let (mut level, mut player, combat) = setup();
        let a = level.spawn_enemy(Vec3::new(0.0, 0.0, 10.0), 100);
        let b = level.spawn_enemy(Vec3::new(0.0, 0.0, 10.8), 100);
        let projectile = level.add_projectile(shot(Vec3::new(0.0, 0.0, 8.0), Vec3::new(0.0, 0.0, 13.0)));

        let resolution = resolve(&mut level, &mut player, &combat, &mut NullFeedback, &mut Fixed(0.5));

        assert_eq!(resolution.hits, 0);
        assert_eq!(resolution.multi_hits, 1);
        assert_eq!(level.enemies.get(a).unwrap().health.current, 100);
        assert_eq!(level.enemies.get(b).unwrap().health.current, 100);
        assert!(level.projectiles.contains(projectile));
    }

    #[test]
    fn test_killing_blow_and_reward() {
        let (mut level, mut player, combat) = setup();
        let enemy = level.spawn_enemy(Vec3::new(0.0, 0.0, 10.0), 20);
        level.add_projectile(shot(Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.0, 11.0)));
        let ammo = player.ammo;

        let resolution = resolve(&mut level, &mut player, &combat, &mut NullFeedback, &mut Fixed(0.04));

        assert_eq!(resolution.kills, 1);
        assert!(!level.enemies.contains(enemy));
        assert_eq!(player.score, 1);
        assert_eq!(player.ammo, ammo + 5);
        assert_eq!(player.healing_items, 1);
    }

    #[test]
    fn test_sweep_removes_adjacent_dead() {
        let (mut level, mut player, combat) = setup();
        let handles: Vec<_> = (0..5)
            .map(|i| level.spawn_enemy(Vec3::new(20.0 + 3.0 * i as f32, 0.0, 0.0), 100))
            .collect();
        for &dead in &handles[1..4] {
            level.enemies.get_mut(dead).unwrap().health.set_health(0);
        }

        let mut resolution = Resolution::default();
        sweep_dead_enemies(&mut level.enemies, &mut player, &combat, &mut Fixed(0.9), &mut resolution);

        assert_eq!(resolution.kills, 3);
        assert_eq!(player.score, 3);
        assert_eq!(level.enemies.len(), 2);
        assert!(level.enemies.contains(handles[0]));
        assert!(level.enemies.contains(handles[4]));
    }

    #[test]
    fn test_nothing_nearby() {
        let (mut level, mut player, combat) = setup();
        level.spawn_enemy(Vec3::new(50.0, 0.0, 0.0), 100);
        level.add_projectile(shot(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)));

        let resolution = resolve(&mut level, &mut player, &combat, &mut NullFeedback, &mut Fixed(0.0));

        assert_eq!(resolution, Resolution::default());
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.projectiles.len(), 1);
        assert_eq!(player.health.current, 100);
    }
}
