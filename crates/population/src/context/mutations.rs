use bevy::prelude::*;

use crate::categories::{Category, SubCategory};
use crate::error::ConfigError;
use crate::knobs::CategoryKnobs;
use crate::packs::{CalculationPack, PackSlot};
use crate::resolver::DefaultChange;

use super::CalculationContext;

/// Log a rejected mutation and pass the error on.
fn rejected<T>(result: Result<T, ConfigError>) -> Result<T, ConfigError> {
    if let Err(e) = &result {
        error!("Configuration change rejected: {}", e);
    }
    result
}

impl CalculationContext {
    /// Add or replace a user-defined pack. Replacing a pack changes its
    /// contents under the same name, so every cached result is dropped.
    pub fn register_custom_pack(&mut self, pack: CalculationPack) -> Result<(), ConfigError> {
        let name = pack.name().to_string();
        let replaced = rejected(self.registry.register_custom(pack))?;
        if replaced.is_some() {
            self.cache.clear();
        }
        info!("Registered custom pack '{}'", name);
        self.bump();
        Ok(())
    }

    /// Change the default pack of one slot for a sub-category. Cached results
    /// for that sub-category are re-evaluated on next query.
    pub fn change_default(
        &mut self,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
        pack_name: &str,
    ) -> Result<DefaultChange, ConfigError> {
        let change = rejected(self.resolver.change_default(
            &self.registry,
            slot,
            category,
            sub_category,
            pack_name,
        ))?;
        if change.changed() {
            self.cache.invalidate_class(category, Some(sub_category));
            self.bump();
        }
        Ok(change)
    }

    pub fn clear_default(
        &mut self,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
    ) -> Option<String> {
        let previous = self.resolver.clear_default(slot, category, sub_category)?;
        self.cache.invalidate_class(category, Some(sub_category));
        self.bump();
        Some(previous)
    }

    /// Pin a pack to one building, bypassing its sub-category default.
    pub fn pin_pack(
        &mut self,
        slot: PackSlot,
        identity: &str,
        category: Category,
        pack_name: &str,
    ) -> Result<Option<String>, ConfigError> {
        let previous = rejected(self.resolver.pin(
            &self.registry,
            slot,
            identity,
            category,
            pack_name,
        ))?;
        self.cache.invalidate_building(identity);
        self.bump();
        Ok(previous)
    }

    pub fn unpin_pack(&mut self, slot: PackSlot, identity: &str) -> Option<String> {
        let previous = self.resolver.unpin(slot, identity)?;
        self.cache.invalidate_building(identity);
        self.bump();
        Some(previous)
    }

    /// Fix a building's population at `count`, whatever its pack says.
    /// Zero is rejected; use [`clear_population_override`](Self::clear_population_override).
    pub fn set_population_override(
        &mut self,
        identity: &str,
        count: u16,
    ) -> Result<Option<u16>, ConfigError> {
        if count == 0 {
            return rejected(Err(ConfigError::InvalidPopulationOverride {
                identity: identity.to_string(),
                value: count,
            }));
        }
        let previous = self
            .population_overrides
            .insert(identity.to_string(), count);
        self.cache.invalidate_building(identity);
        self.bump();
        Ok(previous)
    }

    pub fn clear_population_override(&mut self, identity: &str) -> Option<u16> {
        let previous = self.population_overrides.remove(identity)?;
        self.cache.invalidate_building(identity);
        self.bump();
        Some(previous)
    }

    /// Fix a building's total workplaces. The total is still split by the
    /// active pack's tier weights.
    pub fn set_workplace_override(
        &mut self,
        identity: &str,
        count: u16,
    ) -> Result<Option<u16>, ConfigError> {
        if count == 0 {
            return rejected(Err(ConfigError::InvalidPopulationOverride {
                identity: identity.to_string(),
                value: count,
            }));
        }
        let previous = self.workplace_overrides.insert(identity.to_string(), count);
        self.cache.invalidate_building(identity);
        self.bump();
        Ok(previous)
    }

    pub fn clear_workplace_override(&mut self, identity: &str) -> Option<u16> {
        let previous = self.workplace_overrides.remove(identity)?;
        self.cache.invalidate_building(identity);
        self.bump();
        Some(previous)
    }

    pub fn set_knobs(&mut self, category: Category, knobs: CategoryKnobs) -> Result<(), ConfigError> {
        rejected(knobs.validate(category))?;
        if knobs == CategoryKnobs::default() {
            self.knobs.remove(&category);
        } else {
            self.knobs.insert(category, knobs);
        }
        self.cache.invalidate_class(category, None);
        self.bump();
        Ok(())
    }

    pub fn set_population_multiplier(
        &mut self,
        category: Category,
        multiplier: f32,
    ) -> Result<(), ConfigError> {
        let knobs = CategoryKnobs {
            population_multiplier: multiplier,
            ..self.knobs(category)
        };
        self.set_knobs(category, knobs)
    }

    /// Something outside the context changed for a building class. `None`
    /// covers every sub-category of `category`.
    pub fn on_configuration_changed(
        &mut self,
        category: Category,
        sub_category: Option<SubCategory>,
    ) -> usize {
        let evicted = self.cache.invalidate_class(category, sub_category);
        self.bump();
        evicted
    }

    pub fn on_building_override_changed(&mut self, identity: &str) -> bool {
        let evicted = self.cache.invalidate_building(identity);
        self.bump();
        evicted
    }

    /// Drop every custom pack, default, pin, override and knob.
    pub fn reset(&mut self) {
        self.registry = crate::packs::PackRegistry::with_builtins();
        self.resolver = crate::resolver::PackResolver::default();
        self.population_overrides.clear();
        self.workplace_overrides.clear();
        self.knobs.clear();
        self.cache.clear();
        self.bump();
    }
}
