//! What the player earns for a kill

use crate::config::CombatConfig;
use serde::{Deserialize, Serialize};
use thicket_core::RandomSource;

/// Reward granted for one enemy death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathReward {
    pub score: u32,
    pub ammo: u32,
    pub healing_items: u32,
}

impl DeathReward {
    /// Roll the reward for a single death. Draws exactly one float from `rng`.
    pub fn roll<R: RandomSource + ?Sized>(config: &CombatConfig, rng: &mut R) -> Self {
        let dropped = rng.roll(config.heal_drop_chance);
        if dropped {
            log::debug!("kill dropped a healing item");
        }
        Self {
            score: config.score_per_kill,
            ammo: config.ammo_per_kill,
            healing_items: u32::from(dropped),
        }
    }

    /// Sum of two rewards
    pub fn combine(self, other: Self) -> Self {
        Self {
            score: self.score + other.score,
            ammo: self.ammo + other.ammo,
            healing_items: self.healing_items + other.healing_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }

        fn next_int(&mut self, _max: u32) -> u32 {
            0
        }
    }

    #[test]
    fn test_heal_drop_below_chance() {
        let reward = DeathReward::roll(&CombatConfig::default(), &mut Fixed(0.04));
        assert_eq!(
            reward,
            DeathReward {
                score: 1,
                ammo: 5,
                healing_items: 1
            }
        );
    }

    #[test]
    fn test_no_heal_drop_above_chance() {
        let reward = DeathReward::roll(&CombatConfig::default(), &mut Fixed(0.10));
        assert_eq!(reward.score, 1);
        assert_eq!(reward.ammo, 5);
        assert_eq!(reward.healing_items, 0);
    }

    #[test]
    fn test_exact_chance_does_not_drop() {
        let reward = DeathReward::roll(&CombatConfig::default(), &mut Fixed(0.05));
        assert_eq!(reward.healing_items, 0);
    }

    #[test]
    fn test_combine() {
        let a = DeathReward::roll(&CombatConfig::default(), &mut Fixed(0.0));
        let b = DeathReward::roll(&CombatConfig::default(), &mut Fixed(0.9));
        assert_eq!(
            a.combine(b),
            DeathReward {
                score: 2,
                ammo: 10,
                healing_items: 1
            }
        );
    }
}
