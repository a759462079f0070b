//! Built-in pack tables.
//!
//! Densities are calibrated against typical floor areas per household and
//! per worker for each building style. They are product data: the formulas
//! in `formulas` are what matter, these numbers only have to be plausible.

use crate::categories::Category;

use super::types::{
    CalculationPack, EducationLevel, FloorPack, LegacyLevel, LevelDensity, PackMeta, PackVersion,
    PopulationModel, PopulationPack, SchoolPack,
};

/// Name of the sentinel pack that defers to the host's own values.
pub const VANILLA_PACK: &str = "vanilla";

fn floor(name: &str, height: f32, min: f32, extra: f32, empty: bool) -> CalculationPack {
    CalculationPack::Floor(FloorPack {
        meta: PackMeta::new(name, PackVersion::Standard),
        floor_height: height,
        first_floor_min_height: min,
        first_floor_extra_height: extra,
        first_floor_is_empty: empty,
    })
}

fn volumetric(name: &str, category: Category, levels: Vec<LevelDensity>) -> CalculationPack {
    CalculationPack::Population(PopulationPack::volumetric(name, category, levels))
}

fn legacy(name: &str, category: Category, levels: Vec<LegacyLevel>) -> CalculationPack {
    CalculationPack::Population(PopulationPack::legacy(name, category, levels))
}

fn legacy_level(per_hundred: u32, minimum: u32, weights: [u16; 4], visit: u16) -> LegacyLevel {
    LegacyLevel {
        units_per_hundred_cells: per_hundred,
        minimum,
        workplace_weights: weights,
        visit_percent: visit,
    }
}

/// Three workplace levels sharing geometry parameters but with shifting skill mix.
fn job_levels(
    areas: [f32; 3],
    empty_fixed: f32,
    empty_pct: u8,
    span: bool,
    weights: [[u16; 4]; 3],
    visits: [u16; 3],
) -> Vec<LevelDensity> {
    (0..3)
        .map(|i| LevelDensity::jobs(areas[i], empty_fixed, empty_pct, span, weights[i], visits[i]))
        .collect()
}

fn home_levels(areas: [f32; 5], empty_fixed: f32, empty_pct: u8, span: bool) -> Vec<LevelDensity> {
    areas
        .iter()
        .map(|&a| LevelDensity::homes(a, empty_fixed, empty_pct, span))
        .collect()
}

fn school(
    name: &str,
    education_level: EducationLevel,
    base_workers: [u32; 4],
    students_per_extra_worker: [u32; 4],
    costs: [u32; 4],
) -> CalculationPack {
    CalculationPack::School(SchoolPack {
        meta: PackMeta::new(name, PackVersion::Standard),
        education_level,
        base_workers,
        students_per_extra_worker,
        base_cost: costs[0],
        cost_per_student: costs[1],
        base_maintenance: costs[2],
        maintenance_per_student: costs[3],
    })
}

/// Every pack seeded into a fresh registry, in display order.
pub fn builtin_packs() -> Vec<CalculationPack> {
    vec![
        // Floors
        floor("floor-generic", 3.0, 3.0, 0.0, false),
        floor("floor-residential", 3.0, 3.0, 0.5, false),
        floor("floor-commercial", 4.0, 3.0, 1.0, false),
        floor("floor-office", 3.5, 3.0, 0.5, true),
        floor("floor-industrial", 6.0, 3.0, 3.0, false),
        floor("floor-school", 4.0, 3.0, 0.0, false),
        // Universal sentinel
        CalculationPack::Population(PopulationPack {
            meta: PackMeta::new(VANILLA_PACK, PackVersion::Standard),
            category: Category::None,
            model: PopulationModel::Vanilla,
        }),
        // Residential
        volumetric(
            "res-detached",
            Category::Residential,
            home_levels([200.0, 190.0, 180.0, 170.0, 160.0], 0.0, 10, true),
        ),
        volumetric(
            "res-terraced",
            Category::Residential,
            home_levels([140.0, 135.0, 130.0, 125.0, 120.0], 0.0, 10, true),
        ),
        volumetric(
            "res-apartment",
            Category::Residential,
            home_levels([110.0, 105.0, 100.0, 95.0, 90.0], 40.0, 15, false),
        ),
        volumetric(
            "res-eco-detached",
            Category::Residential,
            home_levels([220.0, 210.0, 200.0, 190.0, 180.0], 0.0, 12, true),
        ),
        volumetric(
            "res-eco-apartment",
            Category::Residential,
            home_levels([120.0, 115.0, 110.0, 105.0, 100.0], 40.0, 18, false),
        ),
        legacy(
            "res-legacy",
            Category::Residential,
            vec![
                legacy_level(30, 1, [0; 4], 0),
                legacy_level(40, 1, [0; 4], 0),
                legacy_level(50, 1, [0; 4], 0),
                legacy_level(60, 1, [0; 4], 0),
                legacy_level(70, 1, [0; 4], 0),
            ],
        ),
        // Commercial
        volumetric(
            "com-shop",
            Category::Commercial,
            job_levels(
                [40.0, 35.0, 30.0],
                0.0,
                20,
                true,
                [[75, 20, 5, 0], [50, 35, 15, 0], [20, 40, 30, 10]],
                [90, 100, 110],
            ),
        ),
        volumetric(
            "com-mall",
            Category::Commercial,
            job_levels(
                [35.0, 30.0, 25.0],
                60.0,
                20,
                false,
                [[70, 25, 5, 0], [45, 35, 15, 5], [20, 40, 30, 10]],
                [120, 130, 140],
            ),
        ),
        volumetric(
            "com-leisure",
            Category::Commercial,
            job_levels(
                [45.0, 45.0, 45.0],
                40.0,
                25,
                false,
                [[60, 30, 10, 0], [60, 30, 10, 0], [60, 30, 10, 0]],
                [250, 250, 250],
            ),
        ),
        volumetric(
            "com-tourist",
            Category::Commercial,
            job_levels(
                [50.0, 50.0, 50.0],
                40.0,
                25,
                false,
                [[55, 30, 10, 5], [55, 30, 10, 5], [55, 30, 10, 5]],
                [300, 300, 300],
            ),
        ),
        volumetric(
            "com-eco",
            Category::Commercial,
            job_levels(
                [45.0, 45.0, 45.0],
                0.0,
                20,
                true,
                [[40, 40, 15, 5], [40, 40, 15, 5], [40, 40, 15, 5]],
                [100, 100, 100],
            ),
        ),
        legacy(
            "com-legacy",
            Category::Commercial,
            vec![
                legacy_level(50, 2, [75, 20, 5, 0], 90),
                legacy_level(75, 2, [50, 35, 15, 0], 100),
                legacy_level(100, 2, [20, 40, 30, 10], 110),
            ],
        ),
        // Office
        volumetric(
            "off-generic",
            Category::Office,
            job_levels(
                [12.0, 11.0, 10.0],
                80.0,
                20,
                false,
                [[2, 8, 60, 30], [1, 5, 50, 44], [1, 2, 40, 57]],
                [0, 0, 0],
            ),
        ),
        volumetric(
            "off-hightech",
            Category::Office,
            job_levels(
                [14.0, 14.0, 14.0],
                80.0,
                20,
                false,
                [[1, 2, 40, 57], [1, 2, 40, 57], [1, 2, 40, 57]],
                [0, 0, 0],
            ),
        ),
        legacy(
            "off-legacy",
            Category::Office,
            vec![
                legacy_level(120, 3, [2, 8, 60, 30], 0),
                legacy_level(160, 3, [1, 5, 50, 44], 0),
                legacy_level(200, 3, [1, 2, 40, 57], 0),
            ],
        ),
        // Industrial
        volumetric(
            "ind-factory",
            Category::Industrial,
            job_levels(
                [70.0, 60.0, 50.0],
                0.0,
                25,
                true,
                [[70, 20, 10, 0], [40, 40, 15, 5], [20, 40, 30, 10]],
                [0, 0, 0],
            ),
        ),
        volumetric(
            "ind-farming",
            Category::Industrial,
            job_levels(
                [200.0, 200.0, 200.0],
                0.0,
                10,
                true,
                [[90, 10, 0, 0], [90, 10, 0, 0], [90, 10, 0, 0]],
                [0, 0, 0],
            ),
        ),
        volumetric(
            "ind-forestry",
            Category::Industrial,
            job_levels(
                [150.0, 150.0, 150.0],
                0.0,
                10,
                true,
                [[90, 10, 0, 0], [90, 10, 0, 0], [90, 10, 0, 0]],
                [0, 0, 0],
            ),
        ),
        volumetric(
            "ind-oil",
            Category::Industrial,
            job_levels(
                [90.0, 90.0, 90.0],
                0.0,
                15,
                true,
                [[30, 50, 15, 5], [30, 50, 15, 5], [30, 50, 15, 5]],
                [0, 0, 0],
            ),
        ),
        volumetric(
            "ind-ore",
            Category::Industrial,
            job_levels(
                [100.0, 100.0, 100.0],
                0.0,
                15,
                true,
                [[50, 40, 10, 0], [50, 40, 10, 0], [50, 40, 10, 0]],
                [0, 0, 0],
            ),
        ),
        legacy(
            "ind-legacy",
            Category::Industrial,
            vec![
                legacy_level(40, 2, [70, 20, 10, 0], 0),
                legacy_level(60, 2, [40, 40, 15, 5], 0),
                legacy_level(80, 2, [20, 40, 30, 10], 0),
            ],
        ),
        // Education: students
        volumetric(
            "sch-elementary-students",
            Category::Education,
            vec![LevelDensity::homes(8.0, 120.0, 20, false)],
        ),
        volumetric(
            "sch-high-students",
            Category::Education,
            vec![LevelDensity::homes(10.0, 160.0, 20, false)],
        ),
        // Education: staffing
        school(
            "sch-elementary",
            EducationLevel::Elementary,
            [2, 4, 2, 1],
            [0, 40, 80, 0],
            [10_000, 30, 800, 4],
        ),
        school(
            "sch-high",
            EducationLevel::HighSchool,
            [2, 4, 4, 2],
            [0, 50, 40, 100],
            [20_000, 40, 1_600, 6],
        ),
    ]
}
