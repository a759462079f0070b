use serde::{Deserialize, Serialize};

use crate::config::TIER_COUNT;

/// Workplaces split across the four education tiers.
///
/// Tier 0 absorbs any rounding remainder, so the sum always equals the total
/// that was split.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub struct WorkplaceTiers {
    pub tier0: u32,
    pub tier1: u32,
    pub tier2: u32,
    pub tier3: u32,
}

impl WorkplaceTiers {
    pub fn from_array(tiers: [u32; TIER_COUNT]) -> Self {
        Self {
            tier0: tiers[0],
            tier1: tiers[1],
            tier2: tiers[2],
            tier3: tiers[3],
        }
    }

    pub fn as_array(&self) -> [u32; TIER_COUNT] {
        [self.tier0, self.tier1, self.tier2, self.tier3]
    }

    pub fn total(&self) -> u32 {
        self.tier0 + self.tier1 + self.tier2 + self.tier3
    }
}

/// Unit count with the per-floor contributions that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitBreakdown {
    /// `(floor index, units)` in floor order. Empty when units span all
    /// floors or the count is fixed.
    pub per_floor: Vec<(u16, u32)>,
    /// Final count, never below 1.
    pub total: u32,
}
