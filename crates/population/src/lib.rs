//! Volumetric population and capacity engine.
//!
//! Given a building's footprint and height-map plus named calculation packs,
//! derives households, workplaces split by education tier, visitor places
//! and school staffing. All state lives in a [`CalculationContext`] owned by
//! the caller; [`PopulationEnginePlugin`] wires it into a Bevy app.

use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod cache;
pub mod categories;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod formulas;
pub mod geometry;
pub mod knobs;
pub mod packs;
pub mod plugin;
pub mod prefabs;
pub mod resolver;
pub mod snapshot;

pub use categories::{Category, ResultKind, SubCategory};
pub use components::{BuildingCapacity, PopulationBuilding};
pub use context::CalculationContext;
pub use error::ConfigError;
pub use formulas::WorkplaceTiers;
pub use geometry::BuildingShape;
pub use knobs::CategoryKnobs;
pub use packs::{CalculationPack, PackRegistry, PackSlot};
pub use plugin::{BuildingOverrideChanged, ConfigurationChanged, PopulationEnginePlugin};
pub use prefabs::{PrefabCatalog, PrefabRecord, PrefabSource};
pub use snapshot::{ConfigurationSnapshot, LoadReport};

// ---------------------------------------------------------------------------
// Saveable trait + registry for the extension map save pattern
// ---------------------------------------------------------------------------

/// A resource whose state is persisted under its own key in the save file.
///
/// Loading restores into the existing resource instead of replacing it, so
/// resources holding injected collaborators keep them across a load.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key for this resource in the save file's extension map.
    /// Must be stable across versions.
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes. `None` skips saving (e.g. when
    /// nothing differs from the default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Restore state from bytes written by [`save_to_bytes`](Self::save_to_bytes).
    fn load_from_bytes(&mut self, bytes: &[u8]);

    /// Return to the freshly-constructed state.
    fn reset_state(&mut self);
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Registry of all saveable resources, populated during plugin setup.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`. A second
    /// registration under the same key is ignored.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "SaveableRegistry: duplicate key '{}', ignoring second registration",
                key
            );
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                world
                    .get_resource_or_insert_with(T::default)
                    .load_from_bytes(bytes);
            }),
            reset_fn: Box::new(|world: &mut World| {
                if let Some(mut resource) = world.get_resource_mut::<T>() {
                    resource.reset_state();
                }
            }),
        });
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Save all registered resources into an extension map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Load registered resources from an extension map. A resource whose key
    /// is absent is reset, so stale state never survives a load.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            match extensions.get(&entry.key) {
                Some(bytes) => (entry.load_fn)(world, bytes),
                None => (entry.reset_fn)(world),
            }
        }
    }

    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

/// Registers a [`Saveable`] resource from a plugin's `build`.
pub trait SaveableAppExt {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self;
}

impl SaveableAppExt for App {
    fn register_saveable<T: Saveable>(&mut self) -> &mut Self {
        self.init_resource::<SaveableRegistry>();
        self.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<T>();
        self
    }
}

impl Saveable for CalculationContext {
    const SAVE_KEY: &'static str = "population_config";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return None;
        }
        Some(bitcode::encode(&snapshot))
    }

    /// Undecodable bytes leave the current configuration in place.
    fn load_from_bytes(&mut self, bytes: &[u8]) {
        match bitcode::decode::<ConfigurationSnapshot>(bytes) {
            Ok(snapshot) => {
                self.load_snapshot(&snapshot);
            }
            Err(e) => warn!(
                "Saveable {}: failed to decode {} bytes, keeping current configuration: {}",
                Self::SAVE_KEY,
                bytes.len(),
                e
            ),
        }
    }

    fn reset_state(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod saveable_tests {
    use super::*;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct TestCounter {
        value: u32,
    }

    impl Saveable for TestCounter {
        const SAVE_KEY: &'static str = "test_counter";

        fn save_to_bytes(&self) -> Option<Vec<u8>> {
            if self.value == 0 {
                None
            } else {
                Some(self.value.to_le_bytes().to_vec())
            }
        }

        fn load_from_bytes(&mut self, bytes: &[u8]) {
            self.value = u32::from_le_bytes(bytes.try_into().unwrap_or([0; 4]));
        }

        fn reset_state(&mut self) {
            self.value = 0;
        }
    }

    #[test]
    fn test_registry_register_and_save() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 42 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        let extensions = registry.save_all(&world);
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions["test_counter"], 42u32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_registry_save_skips_default() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 0 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        assert!(registry.save_all(&world).is_empty());
    }

    #[test]
    fn test_registry_load_and_reset_missing_keys() {
        let mut world = World::new();
        world.insert_resource(TestCounter { value: 5 });

        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();

        let mut extensions = BTreeMap::new();
        extensions.insert("test_counter".to_string(), 99u32.to_le_bytes().to_vec());
        registry.load_all(&mut world, &extensions);
        assert_eq!(world.resource::<TestCounter>().value, 99);

        extensions.clear();
        extensions.insert("unknown_feature".to_string(), vec![0xFF, 0xFF]);
        registry.load_all(&mut world, &extensions);
        assert_eq!(world.resource::<TestCounter>().value, 0);
    }

    #[test]
    fn test_registry_duplicate_key_ignored() {
        let mut registry = SaveableRegistry::default();
        registry.register::<TestCounter>();
        registry.register::<TestCounter>();
        assert_eq!(registry.entries.len(), 1);
        assert!(registry.contains("test_counter"));
    }

    #[test]
    fn test_context_saveable_round_trip() {
        let mut ctx = CalculationContext::default();
        assert!(ctx.save_to_bytes().is_none());
        ctx.set_population_override("Tower", 40).unwrap();
        ctx.change_default(
            PackSlot::Population,
            Category::Residential,
            SubCategory::ResidentialLow,
            "res-terraced",
        )
        .unwrap();
        let bytes = ctx.save_to_bytes().expect("non-default state saves");

        let mut restored = CalculationContext::default();
        restored.load_from_bytes(&bytes);
        assert_eq!(restored.snapshot(), ctx.snapshot());

        restored.reset_state();
        assert!(restored.snapshot().is_empty());
    }

    #[test]
    fn test_context_undecodable_bytes_keep_configuration() {
        let mut ctx = CalculationContext::default();
        ctx.set_population_override("Tower", 40).unwrap();
        ctx.set_knobs(
            Category::Commercial,
            CategoryKnobs {
                inventory_cap: 500,
                ..Default::default()
            },
        )
        .unwrap();
        let before = ctx.snapshot();

        ctx.load_from_bytes(&[]);

        assert_eq!(ctx.population_override("Tower"), Some(40));
        assert_eq!(ctx.snapshot(), before);
        assert!(ctx.save_to_bytes().is_some());
    }
}
