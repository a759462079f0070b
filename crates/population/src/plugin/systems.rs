use bevy::prelude::*;

use crate::components::{BuildingCapacity, PopulationBuilding};
use crate::context::CalculationContext;

use super::types::{BuildingOverrideChanged, CapacityRefresh, ConfigurationChanged};

/// Apply invalidation events to the context's cache.
pub fn apply_configuration_events(
    mut context: ResMut<CalculationContext>,
    mut configuration: EventReader<ConfigurationChanged>,
    mut overrides: EventReader<BuildingOverrideChanged>,
) {
    for event in configuration.read() {
        let evicted = context.on_configuration_changed(event.category, event.sub_category);
        debug!(
            "{:?}/{:?} changed, {} cached results evicted",
            event.category, event.sub_category, evicted
        );
    }
    for event in overrides.read() {
        context.on_building_override_changed(&event.identity);
    }
}

fn compute_capacity(context: &CalculationContext, building: &PopulationBuilding) -> BuildingCapacity {
    let multiplier = context.knobs(building.category).population_multiplier;
    BuildingCapacity {
        population: context.population(
            &building.identity,
            building.category,
            building.sub_category,
            building.level,
            multiplier,
        ),
        workplaces: context.workplaces(
            &building.identity,
            building.category,
            building.sub_category,
            building.level,
        ),
        visitors: context.visitors(
            &building.identity,
            building.category,
            building.sub_category,
            building.level,
        ),
    }
}

/// Recompute `BuildingCapacity` for buildings that are new or changed, or
/// for every building once the context's revision moves.
pub fn refresh_building_capacity(
    mut commands: Commands,
    context: Res<CalculationContext>,
    mut refresh: ResMut<CapacityRefresh>,
    mut buildings: Query<(Entity, Ref<PopulationBuilding>, Option<&mut BuildingCapacity>)>,
) {
    let revision = context.revision();
    let all = refresh.seen_revision != Some(revision);
    let mut refreshed = 0;

    for (entity, building, capacity) in &mut buildings {
        match capacity {
            Some(mut capacity) => {
                if !all && !building.is_changed() {
                    continue;
                }
                let computed = compute_capacity(&context, &building);
                capacity.set_if_neq(computed);
            }
            None => {
                let computed = compute_capacity(&context, &building);
                commands.entity(entity).insert(computed);
            }
        }
        refreshed += 1;
    }

    refresh.seen_revision = Some(revision);
    refresh.last_refreshed = refreshed;
}
