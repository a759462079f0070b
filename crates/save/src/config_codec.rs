// ---------------------------------------------------------------------------
// config_codec – the configuration file body and world save/load
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;

use bevy::prelude::*;
use population::SaveableRegistry;

use crate::file_header::{unwrap_header, wrap_with_header};
use crate::save_error::SaveError;

/// Schema version of [`ConfigFile`].
pub const CONFIG_FILE_VERSION: u32 = 1;

/// File body: one encoded blob per registered `Saveable`, keyed by its
/// `SAVE_KEY`.
#[derive(Debug, Clone, Default, PartialEq, bitcode::Encode, bitcode::Decode)]
pub struct ConfigFile {
    pub version: u32,
    pub extensions: BTreeMap<String, Vec<u8>>,
}

impl ConfigFile {
    pub fn new(extensions: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            version: CONFIG_FILE_VERSION,
            extensions,
        }
    }

    pub fn encode(&self, compress: bool) -> Vec<u8> {
        wrap_with_header(&bitcode::encode(self), compress)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        let (_, payload) = unwrap_header(bytes)?;
        let file: ConfigFile = bitcode::decode(&payload)?;
        if file.version > CONFIG_FILE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected_max: CONFIG_FILE_VERSION,
                found: file.version,
            });
        }
        Ok(file)
    }
}

/// Collect every registered `Saveable` into file bytes.
pub fn save_world_to_bytes(world: &World, compress: bool) -> Result<Vec<u8>, SaveError> {
    let registry = world
        .get_resource::<SaveableRegistry>()
        .ok_or_else(|| SaveError::MissingResource("SaveableRegistry"))?;
    Ok(ConfigFile::new(registry.save_all(world)).encode(compress))
}

/// Restore every registered `Saveable` from file bytes. Nothing in the world
/// changes unless the whole file validates. Returns how many sections the
/// file carried.
pub fn load_world_from_bytes(world: &mut World, bytes: &[u8]) -> Result<usize, SaveError> {
    let file = ConfigFile::decode(bytes)?;
    if !world.contains_resource::<SaveableRegistry>() {
        return Err(SaveError::MissingResource("SaveableRegistry"));
    }
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        registry.load_all(world, &file.extensions);
    });
    Ok(file.extensions.len())
}
