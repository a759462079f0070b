use std::collections::BTreeMap;

use crate::packs::FloorPack;

use super::types::{BuildingShape, FloorLayout};

/// Number of whole floors a column of height `h` holds under `pack`.
///
/// Never rounds up: a partial floor at the top is dropped.
pub fn cell_floor_count(h: f32, pack: &FloorPack) -> u16 {
    if !h.is_finite() || h <= pack.first_floor_min_height {
        return 0;
    }
    let first = if pack.first_floor_is_empty { 0 } else { 1 };
    let above = (h - pack.first_floor_min_height - pack.first_floor_extra_height).max(0.0);
    let upper = if pack.floor_height > 0.0 {
        (above / pack.floor_height).floor()
    } else {
        0.0
    };
    first + upper.min(f32::from(u16::MAX - 1)) as u16
}

/// Convert a building's height-map into per-floor areas.
///
/// Cells are counted per floor as integers and converted to area once, so a
/// uniform building's floors and total come out at `floors x width x length`
/// without per-cell drift.
pub fn compute_floors(shape: &BuildingShape, pack: &FloorPack) -> FloorLayout {
    let cell_area = shape.cell_area();
    let mut layout = FloorLayout::default();
    if cell_area <= 0.0 {
        return layout;
    }

    let mut cells_per_floor: BTreeMap<u16, u32> = BTreeMap::new();
    let mut floor_cells: u64 = 0;
    for &h in shape.heights() {
        let floors = cell_floor_count(h, pack);
        for index in 0..floors {
            *cells_per_floor.entry(index).or_insert(0) += 1;
        }
        floor_cells += u64::from(floors);
    }

    layout.floors = cells_per_floor
        .into_iter()
        .map(|(index, cells)| (index, (f64::from(cells) * cell_area) as f32))
        .collect();
    layout.total_area = (floor_cells as f64 * cell_area) as f32;
    layout
}
