mod systems;
mod types;

pub use systems::{apply_configuration_events, refresh_building_capacity};
pub use types::{BuildingOverrideChanged, CapacityRefresh, ConfigurationChanged};

use bevy::prelude::*;

use crate::context::CalculationContext;
use crate::SaveableAppExt;

/// System set for the engine's `Update` systems, so other plugins can order
/// against capacity refreshes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopulationEngineSet;

pub struct PopulationEnginePlugin;

impl Plugin for PopulationEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CalculationContext>()
            .init_resource::<CapacityRefresh>()
            .add_event::<ConfigurationChanged>()
            .add_event::<BuildingOverrideChanged>()
            .register_saveable::<CalculationContext>()
            .add_systems(
                Update,
                (apply_configuration_events, refresh_building_capacity)
                    .chain()
                    .in_set(PopulationEngineSet),
            );
    }
}
