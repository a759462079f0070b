//! Read-only building data supplied by the host.

use std::collections::HashMap;

use crate::categories::{Category, SubCategory};
use crate::formulas::WorkplaceTiers;
use crate::geometry::BuildingShape;

/// The host's own per-level values, used by the vanilla pack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostDefaults {
    pub population: Vec<u32>,
    pub workplaces: Vec<WorkplaceTiers>,
    pub visitors: Vec<u32>,
}

/// Everything the engine needs to know about one building prefab.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabRecord {
    pub shape: BuildingShape,
    pub category: Category,
    pub sub_category: SubCategory,
    pub host_defaults: HostDefaults,
}

impl PrefabRecord {
    pub fn new(shape: BuildingShape, sub_category: SubCategory) -> Self {
        Self {
            shape,
            category: sub_category.category(),
            sub_category,
            host_defaults: HostDefaults::default(),
        }
    }

    pub fn with_host_defaults(mut self, host_defaults: HostDefaults) -> Self {
        self.host_defaults = host_defaults;
        self
    }
}

/// Host capability that maps a building identity to its prefab data.
pub trait PrefabSource: Send + Sync + 'static {
    fn record(&self, identity: &str) -> Option<&PrefabRecord>;
}

/// In-memory [`PrefabSource`].
#[derive(Debug, Clone, Default)]
pub struct PrefabCatalog {
    records: HashMap<String, PrefabRecord>,
}

impl PrefabCatalog {
    pub fn insert(&mut self, identity: &str, record: PrefabRecord) -> Option<PrefabRecord> {
        self.records.insert(identity.to_string(), record)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, identity: &str, record: PrefabRecord) -> Self {
        self.insert(identity, record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PrefabSource for PrefabCatalog {
    fn record(&self, identity: &str) -> Option<&PrefabRecord> {
        self.records.get(identity)
    }
}
