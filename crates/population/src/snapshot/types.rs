use serde::{Deserialize, Serialize};

use crate::categories::{Category, SubCategory};
use crate::config::SNAPSHOT_VERSION;
use crate::knobs::CategoryKnobs;
use crate::packs::{CalculationPack, PackSlot};

/// A configured per-sub-category default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct DefaultRecord {
    pub slot: PackSlot,
    pub category: Category,
    pub sub_category: SubCategory,
    pub pack: String,
}

/// A per-building pack pin. The category is kept so the pin can be
/// validated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct PinRecord {
    pub slot: PackSlot,
    pub identity: String,
    pub category: Category,
    pub pack: String,
}

/// A manual count pinned to one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct OverrideRecord {
    pub identity: String,
    pub count: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct KnobsRecord {
    pub category: Category,
    pub knobs: CategoryKnobs,
}

/// Everything needed to rebuild a calculation context's configuration.
///
/// Built-in packs are not stored; only custom packs, the resolver tables,
/// overrides and non-default knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct ConfigurationSnapshot {
    pub version: u32,
    #[serde(default)]
    pub custom_packs: Vec<CalculationPack>,
    #[serde(default)]
    pub defaults: Vec<DefaultRecord>,
    #[serde(default)]
    pub pins: Vec<PinRecord>,
    #[serde(default)]
    pub population_overrides: Vec<OverrideRecord>,
    #[serde(default)]
    pub workplace_overrides: Vec<OverrideRecord>,
    #[serde(default)]
    pub knobs: Vec<KnobsRecord>,
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            custom_packs: Vec::new(),
            defaults: Vec::new(),
            pins: Vec::new(),
            population_overrides: Vec::new(),
            workplace_overrides: Vec::new(),
            knobs: Vec::new(),
        }
    }
}

impl ConfigurationSnapshot {
    /// Pretty-printed JSON, suitable for a hand-editable settings file.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_empty(&self) -> bool {
        self.custom_packs.is_empty()
            && self.defaults.is_empty()
            && self.pins.is_empty()
            && self.population_overrides.is_empty()
            && self.workplace_overrides.is_empty()
            && self.knobs.is_empty()
    }
}

/// Outcome of applying a snapshot. Malformed entries are skipped, not fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub applied: usize,
    /// One human-readable line per skipped entry.
    pub skipped: Vec<String>,
}

impl LoadReport {
    pub(crate) fn skip(&mut self, what: String) {
        bevy::log::warn!("Configuration entry skipped: {}", what);
        self.skipped.push(what);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
