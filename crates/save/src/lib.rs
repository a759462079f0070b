//! Persistence for the population engine's configuration: a checksummed,
//! optionally compressed file holding every registered `Saveable` resource.

mod atomic_write;
pub mod config_codec;
pub mod file_header;
mod save_error;
mod save_plugin;

#[cfg(test)]
mod config_io_tests;

pub use atomic_write::atomic_write;
pub use config_codec::{load_world_from_bytes, save_world_to_bytes, ConfigFile};
pub use population::SaveableAppExt;
pub use save_error::SaveError;
pub use save_plugin::{
    load_config_file, save_config_file, ConfigIoStatus, ConfigSavePlugin, ConfigSaveSettings,
    LoadConfigEvent, ResetConfigEvent, SaveConfigEvent,
};
