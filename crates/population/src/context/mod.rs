//! The calculation context: every piece of configuration plus the result
//! cache, owned by the caller and passed by reference into every query.
//!
//! Queries take `&self` and may run from many threads at once; the cache
//! guarantees each entry is computed at most once. Mutations take `&mut self`,
//! so they never overlap a query, and evict the affected cache entries before
//! returning.

mod mutations;
mod persistence;
mod queries;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::cache::ResultCache;
use crate::categories::Category;
use crate::knobs::CategoryKnobs;
use crate::packs::PackRegistry;
use crate::prefabs::{PrefabCatalog, PrefabSource};
use crate::resolver::PackResolver;

#[derive(Resource)]
pub struct CalculationContext {
    registry: PackRegistry,
    resolver: PackResolver,
    population_overrides: BTreeMap<String, u16>,
    workplace_overrides: BTreeMap<String, u16>,
    knobs: BTreeMap<Category, CategoryKnobs>,
    prefabs: Arc<dyn PrefabSource>,
    cache: ResultCache,
    revision: u64,
}

impl Default for CalculationContext {
    fn default() -> Self {
        Self::new(Arc::new(PrefabCatalog::default()))
    }
}

impl fmt::Debug for CalculationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculationContext")
            .field("packs", &self.registry.len())
            .field("resolver", &self.resolver)
            .field("population_overrides", &self.population_overrides)
            .field("workplace_overrides", &self.workplace_overrides)
            .field("knobs", &self.knobs)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl CalculationContext {
    /// A context with the built-in packs and no configuration.
    pub fn new(prefabs: Arc<dyn PrefabSource>) -> Self {
        Self {
            registry: PackRegistry::with_builtins(),
            resolver: PackResolver::default(),
            population_overrides: BTreeMap::new(),
            workplace_overrides: BTreeMap::new(),
            knobs: BTreeMap::new(),
            prefabs,
            cache: ResultCache::default(),
            revision: 0,
        }
    }

    pub fn registry(&self) -> &PackRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &PackResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn prefabs(&self) -> &dyn PrefabSource {
        self.prefabs.as_ref()
    }

    /// Replace the prefab source. Every cached result is dropped.
    pub fn set_prefabs(&mut self, prefabs: Arc<dyn PrefabSource>) {
        self.prefabs = prefabs;
        self.cache.clear();
        self.bump();
    }

    /// Knobs for `category`, or the defaults if none were set.
    pub fn knobs(&self, category: Category) -> CategoryKnobs {
        self.knobs.get(&category).copied().unwrap_or_default()
    }

    pub fn population_override(&self, identity: &str) -> Option<u16> {
        self.population_overrides.get(identity).copied()
    }

    pub fn workplace_override(&self, identity: &str) -> Option<u16> {
        self.workplace_overrides.get(identity).copied()
    }

    /// Increments on every configuration change. ECS systems compare it to
    /// decide whether cached component values are still current.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
