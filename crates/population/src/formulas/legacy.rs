use crate::geometry::BuildingShape;
use crate::packs::LegacyLevel;

/// Lot-size arithmetic used before volumetric packs existed.
///
/// `max(minimum, lot_w x lot_l x per_hundred / 100)`, scaled by `multiplier`
/// and rounded down, never below 1.
pub fn legacy_unit_count(shape: &BuildingShape, level: &LegacyLevel, multiplier: f32) -> u32 {
    let (w, l) = shape.lot_cells();
    let raw = (u64::from(w) * u64::from(l) * u64::from(level.units_per_hundred_cells) / 100)
        .max(u64::from(level.minimum));
    let scaled = (raw as f64 * f64::from(multiplier)).floor() as u32;
    scaled.max(1)
}
