mod builtin;
mod registry;
mod types;

pub use builtin::{builtin_packs, VANILLA_PACK};
pub use registry::PackRegistry;
pub use types::{
    CalculationPack, EducationLevel, FloorPack, LegacyLevel, LevelDensity, LevelLookup, PackMeta,
    PackSlot, PackVersion, PopulationModel, PopulationPack, SchoolPack,
};
