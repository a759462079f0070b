use bevy::prelude::*;

use crate::categories::{Category, SubCategory};

/// Something outside the engine changed for a building class. `None`
/// covers every sub-category.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationChanged {
    pub category: Category,
    pub sub_category: Option<SubCategory>,
}

/// A building's prefab or external overrides changed.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BuildingOverrideChanged {
    pub identity: String,
}

/// Context revision the building components were last refreshed against.
#[derive(Resource, Debug, Default)]
pub struct CapacityRefresh {
    pub seen_revision: Option<u64>,
    /// Buildings refreshed by the last run, for diagnostics.
    pub last_refreshed: usize,
}
