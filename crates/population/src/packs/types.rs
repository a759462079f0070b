use serde::{Deserialize, Serialize};

use crate::categories::Category;
use crate::config::TIER_COUNT;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Pack metadata
// ---------------------------------------------------------------------------

/// Provenance of a pack.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub enum PackVersion {
    /// Built-in pack using the lot-size lookup arithmetic.
    Legacy,
    /// Built-in volumetric pack.
    Standard,
    /// User-defined pack loaded from configuration.
    Custom,
    /// Synthesised on the fly to describe a manual population pin.
    OverrideSynthetic,
}

/// Which resolver slot a pack fills. Each slot is resolved independently.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub enum PackSlot {
    /// Household/workplace/student density.
    Population,
    /// Height-map to floor conversion.
    Floor,
    /// School staffing and running costs.
    School,
}

impl PackSlot {
    pub const ALL: [PackSlot; 3] = [PackSlot::Population, PackSlot::Floor, PackSlot::School];

    pub fn name(self) -> &'static str {
        match self {
            PackSlot::Population => "population",
            PackSlot::Floor => "floor",
            PackSlot::School => "school",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct PackMeta {
    /// Unique registry key.
    pub name: String,
    pub display_name_key: String,
    pub description_key: String,
    pub version: PackVersion,
}

impl PackMeta {
    /// Metadata with localisation keys derived from the pack name.
    pub fn new(name: &str, version: PackVersion) -> Self {
        Self {
            name: name.to_string(),
            display_name_key: format!("pack.{name}.name"),
            description_key: format!("pack.{name}.desc"),
            version,
        }
    }
}

// ---------------------------------------------------------------------------
// Floor packs
// ---------------------------------------------------------------------------

/// Governs how a height-map sample is turned into a number of floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct FloorPack {
    pub meta: PackMeta,
    /// Height of every regular floor in metres.
    pub floor_height: f32,
    /// Cells at or below this height contribute no floors.
    pub first_floor_min_height: f32,
    /// Extra height taken by the first floor on top of the minimum.
    pub first_floor_extra_height: f32,
    /// When set the first floor is a lobby and holds no units.
    pub first_floor_is_empty: bool,
}

// ---------------------------------------------------------------------------
// Population packs
// ---------------------------------------------------------------------------

/// Density parameters for one building level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct LevelDensity {
    /// Floor area (m²) set aside before any units are counted.
    pub empty_area_fixed: f32,
    /// Percentage of the remaining area that holds no units (0..=100).
    pub empty_area_percent: u8,
    /// Area per unit in m². Zero or negative means a fixed count of
    /// `-area_per_unit` units regardless of geometry.
    pub area_per_unit: f32,
    /// Whether units span every floor (detached houses) or are counted per floor.
    pub units_span_all_floors: bool,
    /// Proportional weights of the four workplace tiers.
    pub workplace_weights: [u16; TIER_COUNT],
    /// Visitors per hundred workplaces (commercial only).
    pub visit_percent: u16,
}

impl LevelDensity {
    /// Area-derived household density with no workplaces.
    pub fn homes(area_per_unit: f32, empty_area_fixed: f32, empty_area_percent: u8, span: bool) -> Self {
        Self {
            empty_area_fixed,
            empty_area_percent,
            area_per_unit,
            units_span_all_floors: span,
            workplace_weights: [0; TIER_COUNT],
            visit_percent: 0,
        }
    }

    /// Area-derived workplace density with tier weights.
    pub fn jobs(
        area_per_unit: f32,
        empty_area_fixed: f32,
        empty_area_percent: u8,
        span: bool,
        workplace_weights: [u16; TIER_COUNT],
        visit_percent: u16,
    ) -> Self {
        Self {
            empty_area_fixed,
            empty_area_percent,
            area_per_unit,
            units_span_all_floors: span,
            workplace_weights,
            visit_percent,
        }
    }

    /// Always `count` units, independent of geometry.
    pub fn fixed(count: u32) -> Self {
        Self {
            empty_area_fixed: 0.0,
            empty_area_percent: 0,
            area_per_unit: -(count as f32),
            units_span_all_floors: true,
            workplace_weights: [0; TIER_COUNT],
            visit_percent: 0,
        }
    }
}

/// One level of the legacy lot-size arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct LegacyLevel {
    /// Units per hundred lot cells.
    pub units_per_hundred_cells: u32,
    /// Lower bound applied before the multiplier.
    pub minimum: u32,
    pub workplace_weights: [u16; TIER_COUNT],
    pub visit_percent: u16,
}

/// How a population pack turns geometry into units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub enum PopulationModel {
    Volumetric { levels: Vec<LevelDensity> },
    Legacy { levels: Vec<LegacyLevel> },
    /// Do not override; the host's own value is used.
    Vanilla,
}

/// A per-level record looked up with clamping.
#[derive(Debug, Clone, Copy)]
pub struct LevelLookup<'a, T> {
    pub record: &'a T,
    /// True when the requested level was past the end of the table.
    pub clamped: bool,
}

/// Clamp a 1-based level into a 0-based index for a table of `count` rows.
fn lookup_level<T>(levels: &[T], level: u8) -> Option<LevelLookup<'_, T>> {
    let last = levels.len().checked_sub(1)?;
    let wanted = usize::from(level.max(1)) - 1;
    let index = wanted.min(last);
    Some(LevelLookup {
        record: &levels[index],
        clamped: wanted > last,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct PopulationPack {
    pub meta: PackMeta,
    pub category: Category,
    pub model: PopulationModel,
}

impl PopulationPack {
    pub fn volumetric(name: &str, category: Category, levels: Vec<LevelDensity>) -> Self {
        Self {
            meta: PackMeta::new(name, PackVersion::Standard),
            category,
            model: PopulationModel::Volumetric { levels },
        }
    }

    pub fn legacy(name: &str, category: Category, levels: Vec<LegacyLevel>) -> Self {
        Self {
            meta: PackMeta::new(name, PackVersion::Legacy),
            category,
            model: PopulationModel::Legacy { levels },
        }
    }

    /// Describes a manual population pin as a pack with a fixed unit count.
    pub fn override_synthetic(identity: &str, count: u16) -> Self {
        Self {
            meta: PackMeta::new(&format!("override:{identity}"), PackVersion::OverrideSynthetic),
            category: Category::None,
            model: PopulationModel::Volumetric {
                levels: vec![LevelDensity::fixed(u32::from(count))],
            },
        }
    }

    pub fn is_vanilla(&self) -> bool {
        matches!(self.model, PopulationModel::Vanilla)
    }

    /// Number of levels defined by this pack (0 for vanilla).
    pub fn level_count(&self) -> usize {
        match &self.model {
            PopulationModel::Volumetric { levels } => levels.len(),
            PopulationModel::Legacy { levels } => levels.len(),
            PopulationModel::Vanilla => 0,
        }
    }

    pub fn density(&self, level: u8) -> Option<LevelLookup<'_, LevelDensity>> {
        match &self.model {
            PopulationModel::Volumetric { levels } => lookup_level(levels, level),
            _ => None,
        }
    }

    pub fn legacy_level(&self, level: u8) -> Option<LevelLookup<'_, LegacyLevel>> {
        match &self.model {
            PopulationModel::Legacy { levels } => lookup_level(levels, level),
            _ => None,
        }
    }

    /// Tier weights for `level`, clamped. Vanilla packs have none.
    pub fn workplace_weights(&self, level: u8) -> [u16; TIER_COUNT] {
        match &self.model {
            PopulationModel::Volumetric { levels } => lookup_level(levels, level)
                .map(|l| l.record.workplace_weights)
                .unwrap_or_default(),
            PopulationModel::Legacy { levels } => lookup_level(levels, level)
                .map(|l| l.record.workplace_weights)
                .unwrap_or_default(),
            PopulationModel::Vanilla => [0; TIER_COUNT],
        }
    }

    pub fn visit_percent(&self, level: u8) -> u16 {
        match &self.model {
            PopulationModel::Volumetric { levels } => {
                lookup_level(levels, level).map_or(0, |l| l.record.visit_percent)
            }
            PopulationModel::Legacy { levels } => {
                lookup_level(levels, level).map_or(0, |l| l.record.visit_percent)
            }
            PopulationModel::Vanilla => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// School packs
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub enum EducationLevel {
    Elementary,
    HighSchool,
}

/// Staffing and running-cost parameters for schools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct SchoolPack {
    pub meta: PackMeta,
    pub education_level: EducationLevel,
    /// Workers per tier regardless of enrolment.
    pub base_workers: [u32; TIER_COUNT],
    /// One extra worker per this many students, per tier. Zero disables.
    pub students_per_extra_worker: [u32; TIER_COUNT],
    pub base_cost: u32,
    pub cost_per_student: u32,
    pub base_maintenance: u32,
    pub maintenance_per_student: u32,
}

// ---------------------------------------------------------------------------
// CalculationPack
// ---------------------------------------------------------------------------

/// Any pack the registry can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub enum CalculationPack {
    Floor(FloorPack),
    Population(PopulationPack),
    School(SchoolPack),
}

impl CalculationPack {
    pub fn meta(&self) -> &PackMeta {
        match self {
            CalculationPack::Floor(p) => &p.meta,
            CalculationPack::Population(p) => &p.meta,
            CalculationPack::School(p) => &p.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut PackMeta {
        match self {
            CalculationPack::Floor(p) => &mut p.meta,
            CalculationPack::Population(p) => &mut p.meta,
            CalculationPack::School(p) => &mut p.meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn version(&self) -> PackVersion {
        self.meta().version
    }

    pub fn slot(&self) -> PackSlot {
        match self {
            CalculationPack::Floor(_) => PackSlot::Floor,
            CalculationPack::Population(_) => PackSlot::Population,
            CalculationPack::School(_) => PackSlot::School,
        }
    }

    /// Category this pack is offered for. Floor packs apply to every category.
    pub fn category(&self) -> Category {
        match self {
            CalculationPack::Floor(_) => Category::None,
            CalculationPack::Population(p) => p.category,
            CalculationPack::School(_) => Category::Education,
        }
    }

    pub fn as_floor(&self) -> Option<&FloorPack> {
        match self {
            CalculationPack::Floor(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_population(&self) -> Option<&PopulationPack> {
        match self {
            CalculationPack::Population(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_school(&self) -> Option<&SchoolPack> {
        match self {
            CalculationPack::School(p) => Some(p),
            _ => None,
        }
    }

    /// Check parameter ranges. Custom packs must pass this before registration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPack {
            name: self.name().to_string(),
            reason: reason.to_string(),
        };
        if self.name().trim().is_empty() {
            return Err(invalid("empty name"));
        }
        match self {
            CalculationPack::Floor(p) => {
                if !(p.floor_height.is_finite() && p.floor_height > 0.0) {
                    return Err(invalid("floor height must be greater than 0"));
                }
                if !p.first_floor_min_height.is_finite()
                    || !p.first_floor_extra_height.is_finite()
                    || p.first_floor_min_height < 0.0
                    || p.first_floor_extra_height < 0.0
                {
                    return Err(invalid("first floor heights must be non-negative"));
                }
            }
            CalculationPack::Population(p) => match &p.model {
                PopulationModel::Volumetric { levels } => {
                    if levels.is_empty() {
                        return Err(invalid("no levels defined"));
                    }
                    for level in levels {
                        if !level.area_per_unit.is_finite()
                            || !level.empty_area_fixed.is_finite()
                            || level.empty_area_fixed < 0.0
                        {
                            return Err(invalid("area values must be finite and non-negative"));
                        }
                        if level.empty_area_percent > 100 {
                            return Err(invalid("empty area percent above 100"));
                        }
                    }
                }
                PopulationModel::Legacy { levels } => {
                    if levels.is_empty() {
                        return Err(invalid("no levels defined"));
                    }
                }
                PopulationModel::Vanilla => {}
            },
            CalculationPack::School(_) => {}
        }
        Ok(())
    }
}
