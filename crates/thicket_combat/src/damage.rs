//! Damage sources and information

use serde::{Deserialize, Serialize};

/// Where damage came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageSource {
    /// Body contact with an enemy
    #[default]
    Contact,
    /// A player projectile
    Projectile,
}

/// Information about a damage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: i32,
    /// What dealt it
    pub source: DamageSource,
    /// Entity that caused the damage (handle bits), if known
    pub source_entity: Option<u64>,
    /// World position where damage was applied
    pub hit_point: Option<[f32; 3]>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: i32, source: DamageSource) -> Self {
        Self {
            amount,
            source,
            source_entity: None,
            hit_point: None,
        }
    }

    pub fn contact(amount: i32) -> Self {
        Self::new(amount, DamageSource::Contact)
    }

    pub fn projectile(amount: i32) -> Self {
        Self::new(amount, DamageSource::Projectile)
    }

    /// Set the source entity
    pub fn with_source(mut self, entity: u64) -> Self {
        self.source_entity = Some(entity);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: [f32; 3]) -> Self {
        self.hit_point = Some(point);
        self
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        Self::contact(0)
    }
}
