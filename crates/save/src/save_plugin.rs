use std::path::{Path, PathBuf};

use bevy::prelude::*;
use population::plugin::PopulationEngineSet;
use population::SaveableRegistry;

use crate::atomic_write::atomic_write;
use crate::config_codec::{load_world_from_bytes, save_world_to_bytes};
use crate::save_error::SaveError;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event, Debug, Clone)]
pub struct SaveConfigEvent {
    pub path: PathBuf,
}

#[derive(Event, Debug, Clone)]
pub struct LoadConfigEvent {
    pub path: PathBuf,
}

/// Return every saveable resource to its default state.
#[derive(Event, Debug, Clone, Copy)]
pub struct ResetConfigEvent;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone)]
pub struct ConfigSaveSettings {
    /// LZ4-compress the file body.
    pub compress: bool,
}

impl Default for ConfigSaveSettings {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// Outcome of configuration file operations, for UI and tests.
#[derive(Resource, Debug, Default)]
pub struct ConfigIoStatus {
    pub saves: u32,
    pub loads: u32,
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct ConfigSavePlugin;

impl Plugin for ConfigSavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveConfigEvent>()
            .add_event::<LoadConfigEvent>()
            .add_event::<ResetConfigEvent>()
            .init_resource::<SaveableRegistry>()
            .init_resource::<ConfigSaveSettings>()
            .init_resource::<ConfigIoStatus>()
            .add_systems(Update, exclusive_config_io.before(PopulationEngineSet));
    }
}

// ---------------------------------------------------------------------------
// File operations
// ---------------------------------------------------------------------------

pub fn save_config_file(world: &World, path: &Path) -> Result<(), SaveError> {
    let compress = world
        .get_resource::<ConfigSaveSettings>()
        .is_none_or(|s| s.compress);
    let bytes = save_world_to_bytes(world, compress)?;
    atomic_write(path, &bytes).map_err(|e| SaveError::io(path, e))?;
    Ok(())
}

pub fn load_config_file(world: &mut World, path: &Path) -> Result<usize, SaveError> {
    let bytes = std::fs::read(path).map_err(|e| SaveError::io(path, e))?;
    load_world_from_bytes(world, &bytes)
}

fn drain<E: Event>(world: &mut World) -> Vec<E> {
    match world.get_resource_mut::<Events<E>>() {
        Some(mut events) => events.drain().collect(),
        None => Vec::new(),
    }
}

fn record(world: &mut World, what: &str, path: &Path, result: Result<(), SaveError>) {
    let mut status = world.resource_mut::<ConfigIoStatus>();
    match result {
        Ok(()) => {
            info!("Configuration {} {}", what, path.display());
            status.last_error = None;
        }
        Err(e) => {
            let msg = format!("Configuration {what} {} failed: {e}", path.display());
            error!("{msg}");
            status.last_error = Some(msg);
        }
    }
}

/// Exclusive system handling queued resets, loads and saves, in that order.
pub(crate) fn exclusive_config_io(world: &mut World) {
    if !drain::<ResetConfigEvent>(world).is_empty() {
        world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
            registry.reset_all(world);
        });
        info!("Configuration reset to defaults");
    }

    for event in drain::<LoadConfigEvent>(world) {
        let result = load_config_file(world, &event.path).map(|sections| {
            debug!("Loaded {} configuration sections", sections);
        });
        if result.is_ok() {
            world.resource_mut::<ConfigIoStatus>().loads += 1;
        }
        record(world, "load from", &event.path, result);
    }

    for event in drain::<SaveConfigEvent>(world) {
        let result = save_config_file(world, &event.path);
        if result.is_ok() {
            world.resource_mut::<ConfigIoStatus>().saves += 1;
        }
        record(world, "save to", &event.path, result);
    }
}
