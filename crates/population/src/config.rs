/// Side length of the height-map grid sampled over a building footprint.
pub const GRID_CELLS: usize = 16;
/// Total number of height samples per building (16x16, row-major).
pub const HEIGHT_SAMPLES: usize = GRID_CELLS * GRID_CELLS;

/// Number of workplace tiers (uneducated, educated, well-educated, highly-educated).
pub const TIER_COUNT: usize = 4;

/// Edge length of one host lot cell in metres. Only the legacy path uses lot cells.
pub const LOT_CELL_SIZE: f32 = 8.0;

/// Relative slack added before whole units are taken, so host dimensions
/// stored as `f32` never lose a unit at an exact area boundary.
pub const UNIT_ROUNDING_SLACK: f64 = 1e-6;

/// Visitor demand below this value is raised to it before compression.
pub const MIN_VISITORS: u32 = 5;

/// Width of each band in the visitor diminishing-returns staircase.
pub const VISITOR_BAND_WIDTH: u32 = 200;

/// Marginal rates applied per visitor band, in percent. The last rate applies
/// to everything past the final breakpoint.
pub const VISITOR_BAND_RATES: [u32; 4] = [100, 75, 50, 25];

/// Default inventory cap for commercial goods demand.
pub const DEFAULT_INVENTORY_CAP: u32 = 8_000;

/// Current configuration snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;
