use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::categories::{Category, SubCategory};
use crate::error::ConfigError;
use crate::packs::{
    builtin_packs, CalculationPack, PackMeta, PackRegistry, PackSlot, PackVersion, PopulationModel,
    PopulationPack, VANILLA_PACK,
};

use super::base_defaults::base_default;

/// Which tier of the lookup produced a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Per-building pin.
    Pinned,
    /// Configured per-sub-category default.
    Default,
    /// Compiled-in base default.
    Base,
}

/// Outcome of a default change: the effective default before and after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultChange {
    pub previous: String,
    pub current: String,
}

impl DefaultChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Rebuild a base pack from the built-in table, or the sentinel if even
/// that fails.
fn builtin_fallback(slot: PackSlot, base: &str) -> CalculationPack {
    let mut fallback = None;
    for pack in builtin_packs() {
        if pack.name() == base {
            return pack;
        }
        if fallback.is_none() && pack.slot() == slot {
            fallback = Some(pack);
        }
    }
    fallback.unwrap_or_else(|| {
        CalculationPack::Population(PopulationPack {
            meta: PackMeta::new(VANILLA_PACK, PackVersion::Standard),
            category: Category::None,
            model: PopulationModel::Vanilla,
        })
    })
}

/// Three-tier pack lookup: building pin, then configured default, then the
/// compiled-in base default.
///
/// Only names are stored here; packs themselves live in the
/// [`PackRegistry`]. Stored defaults never equal the base default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackResolver {
    defaults: BTreeMap<(PackSlot, Category, SubCategory), String>,
    pins: BTreeMap<(PackSlot, String), String>,
}

impl PackResolver {
    /// Name of the pack that applies to this building, and which tier chose it.
    pub fn resolve_name(
        &self,
        slot: PackSlot,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> (&str, Resolution) {
        if let Some(name) = self.pins.get(&(slot, identity.to_string())) {
            return (name, Resolution::Pinned);
        }
        if let Some(name) = self.defaults.get(&(slot, category, sub_category)) {
            return (name, Resolution::Default);
        }
        (base_default(slot, category, sub_category), Resolution::Base)
    }

    /// Resolve the active pack. Total: a stored name that no longer exists in
    /// the registry falls through to the next tier, and the base default is
    /// rebuilt from the built-in table if the registry lacks it.
    pub fn resolve(
        &self,
        registry: &PackRegistry,
        slot: PackSlot,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> Arc<CalculationPack> {
        if let Some(name) = self.pins.get(&(slot, identity.to_string())) {
            match registry.get_for(name, slot, category) {
                Ok(pack) => return Arc::clone(pack),
                Err(e) => warn!("Pin for '{}' ignored: {}", identity, e),
            }
        }
        if let Some(name) = self.defaults.get(&(slot, category, sub_category)) {
            match registry.get_for(name, slot, category) {
                Ok(pack) => return Arc::clone(pack),
                Err(e) => warn!(
                    "Default for {:?}/{:?} ignored: {}",
                    category, sub_category, e
                ),
            }
        }
        let base = base_default(slot, category, sub_category);
        if let Some(pack) = registry.find_by_name(base) {
            return Arc::clone(pack);
        }
        error!("Base {} pack '{}' missing from registry", slot.name(), base);
        Arc::new(builtin_fallback(slot, base))
    }

    /// The configured (non-base) default for a sub-category, if any.
    pub fn default_assignment(
        &self,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
    ) -> Option<&str> {
        self.defaults
            .get(&(slot, category, sub_category))
            .map(String::as_str)
    }

    /// Effective default for a sub-category, ignoring pins.
    pub fn effective_default(
        &self,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
    ) -> &str {
        self.default_assignment(slot, category, sub_category)
            .unwrap_or_else(|| base_default(slot, category, sub_category))
    }

    /// Change the default for a sub-category. Choosing the base default
    /// removes the stored entry instead of storing a redundant one.
    pub fn change_default(
        &mut self,
        registry: &PackRegistry,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
        pack_name: &str,
    ) -> Result<DefaultChange, ConfigError> {
        registry.get_for(pack_name, slot, category)?;
        let previous = self
            .effective_default(slot, category, sub_category)
            .to_string();
        let key = (slot, category, sub_category);
        if pack_name == base_default(slot, category, sub_category) {
            self.defaults.remove(&key);
        } else {
            self.defaults.insert(key, pack_name.to_string());
        }
        Ok(DefaultChange {
            previous,
            current: pack_name.to_string(),
        })
    }

    /// Drop a configured default, reverting to the base default.
    pub fn clear_default(
        &mut self,
        slot: PackSlot,
        category: Category,
        sub_category: SubCategory,
    ) -> Option<String> {
        self.defaults.remove(&(slot, category, sub_category))
    }

    /// Pin a pack to one building. Returns the previous pin, if any.
    pub fn pin(
        &mut self,
        registry: &PackRegistry,
        slot: PackSlot,
        identity: &str,
        category: Category,
        pack_name: &str,
    ) -> Result<Option<String>, ConfigError> {
        registry.get_for(pack_name, slot, category)?;
        Ok(self
            .pins
            .insert((slot, identity.to_string()), pack_name.to_string()))
    }

    pub fn unpin(&mut self, slot: PackSlot, identity: &str) -> Option<String> {
        self.pins.remove(&(slot, identity.to_string()))
    }

    pub fn pinned(&self, slot: PackSlot, identity: &str) -> Option<&str> {
        self.pins
            .get(&(slot, identity.to_string()))
            .map(String::as_str)
    }

    /// Stored defaults in key order.
    pub fn defaults(&self) -> impl Iterator<Item = (PackSlot, Category, SubCategory, &str)> + '_ {
        self.defaults
            .iter()
            .map(|(&(slot, cat, sub), name)| (slot, cat, sub, name.as_str()))
    }

    /// Stored pins in key order.
    pub fn pins(&self) -> impl Iterator<Item = (PackSlot, &str, &str)> + '_ {
        self.pins
            .iter()
            .map(|((slot, identity), name)| (*slot, identity.as_str(), name.as_str()))
    }
}
