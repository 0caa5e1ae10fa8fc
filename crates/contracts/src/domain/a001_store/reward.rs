//! Reward resolver: maps a resolved tier to the store's own reward amount
//! and display color.

use super::aggregate::Store;
use crate::enums::tier::Tier;
use serde::{Deserialize, Serialize};

/// Reward of a tier as configured by one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAward {
    pub amount: f64,
    pub color: String,
}

/// Look up the reward and color for `tier` in the store's own tables.
///
/// Always reads the store's tables, never the creation-time defaults. A
/// missing entry is a data-integrity error, distinct from a tier whose
/// configured amount is zero.
pub fn resolve_reward(store: &Store, tier: Tier) -> Result<TierAward, String> {
    let amount = store
        .custom_rewards
        .get(&tier)
        .copied()
        .ok_or_else(|| format!("Tabela de premiação sem o nível {}", tier.code()))?;
    let color = store
        .tier_colors
        .get(&tier)
        .cloned()
        .ok_or_else(|| format!("Tabela de cores sem o nível {}", tier.code()))?;
    Ok(TierAward { amount, color })
}
