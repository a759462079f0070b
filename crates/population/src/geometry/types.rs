use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::{GRID_CELLS, HEIGHT_SAMPLES, LOT_CELL_SIZE};

/// A building's physical shape as supplied by the host prefab.
///
/// Heights are sampled on a 16x16 grid over the bounding-box footprint in
/// row-major order and measured from the building's base.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingShape {
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    heights: Vec<f32>,
}

impl BuildingShape {
    /// Build a shape from host samples. Short inputs are padded with zero
    /// height and long inputs truncated, with a warning.
    pub fn new(bounds_min: Vec3, bounds_max: Vec3, samples: &[f32]) -> Self {
        if samples.len() != HEIGHT_SAMPLES {
            warn!(
                "BuildingShape: expected {} height samples, got {}",
                HEIGHT_SAMPLES,
                samples.len()
            );
        }
        let mut heights = vec![0.0; HEIGHT_SAMPLES];
        for (dst, src) in heights.iter_mut().zip(samples) {
            *dst = *src;
        }
        Self {
            bounds_min,
            bounds_max,
            heights,
        }
    }

    /// A box of `width` x `length` metres with every sample at `height`.
    pub fn uniform(width: f32, length: f32, height: f32) -> Self {
        Self {
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::new(width, height, length),
            heights: vec![height; HEIGHT_SAMPLES],
        }
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        (self.bounds_max.x - self.bounds_min.x).max(0.0)
    }

    /// Extent along Z.
    pub fn length(&self) -> f32 {
        (self.bounds_max.z - self.bounds_min.z).max(0.0)
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height sample at grid cell (`x`, `z`), `None` outside the grid.
    pub fn height_at(&self, x: usize, z: usize) -> Option<f32> {
        if x >= GRID_CELLS || z >= GRID_CELLS {
            return None;
        }
        self.heights.get(z * GRID_CELLS + x).copied()
    }

    /// Planar area of one grid cell.
    pub fn cell_area(&self) -> f64 {
        let cells = GRID_CELLS as f64;
        (f64::from(self.width()) / cells) * (f64::from(self.length()) / cells)
    }

    /// Footprint in host lot cells, rounded up, at least 1x1.
    pub fn lot_cells(&self) -> (u32, u32) {
        let cells = |extent: f32| ((extent / LOT_CELL_SIZE).ceil() as u32).max(1);
        (cells(self.width()), cells(self.length()))
    }
}

/// Floors derived from a height-map: usable area per floor index plus the
/// total across all floors.
///
/// Sparse and ordered by floor index; a floor no cell reaches is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorLayout {
    pub floors: BTreeMap<u16, f32>,
    pub total_area: f32,
}

impl FloorLayout {
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor_area(&self, index: u16) -> f32 {
        self.floors.get(&index).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
