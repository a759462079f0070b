mod calculations;
mod types;

pub use calculations::{cell_floor_count, compute_floors};
pub use types::{BuildingShape, FloorLayout};
