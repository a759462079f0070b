use bevy::prelude::*;

use crate::categories::{Category, SubCategory};
use crate::formulas::WorkplaceTiers;

/// Marks an entity as a building whose capacity the engine maintains.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PopulationBuilding {
    /// Prefab identity; the key for packs pins, overrides and cached results.
    pub identity: String,
    pub category: Category,
    pub sub_category: SubCategory,
    /// 1-based building level.
    pub level: u8,
}

impl PopulationBuilding {
    pub fn new(identity: impl Into<String>, sub_category: SubCategory, level: u8) -> Self {
        Self {
            identity: identity.into(),
            category: sub_category.category(),
            sub_category,
            level,
        }
    }
}

/// Capacity last computed for a [`PopulationBuilding`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildingCapacity {
    pub population: u32,
    pub workplaces: WorkplaceTiers,
    pub visitors: u32,
}
