#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::super::*;
    use crate::geometry::{compute_floors, BuildingShape, FloorLayout};
    use crate::packs::{
        EducationLevel, FloorPack, LegacyLevel, LevelDensity, PackMeta, PackVersion, SchoolPack,
    };

    fn standard_floor() -> FloorPack {
        FloorPack {
            meta: PackMeta::new("test-floor", PackVersion::Custom),
            floor_height: 3.0,
            first_floor_min_height: 3.0,
            first_floor_extra_height: 0.0,
            first_floor_is_empty: false,
        }
    }

    fn twenty_by_twenty_nine_high() -> FloorLayout {
        compute_floors(&BuildingShape::uniform(20.0, 20.0, 9.0), &standard_floor())
    }

    fn layout_of(floors: &[f32]) -> FloorLayout {
        let mut layout = FloorLayout::default();
        for (i, &a) in floors.iter().enumerate() {
            layout.floors.insert(i as u16, a);
            layout.total_area += a;
        }
        layout
    }

    // -------------------------------------------------------------------------
    // Unit counts
    // -------------------------------------------------------------------------

    #[test]
    fn test_whole_building_units() {
        let density = LevelDensity::homes(100.0, 0.0, 0, true);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 1.0), 12);
    }

    #[test]
    fn test_per_floor_units_match_whole_building_for_uniform_floors() {
        let density = LevelDensity::homes(100.0, 0.0, 0, false);
        let breakdown = unit_breakdown(&twenty_by_twenty_nine_high(), &density, 1.0);
        assert_eq!(breakdown.per_floor, vec![(0, 4), (1, 4), (2, 4)]);
        assert_eq!(breakdown.total, 12);
    }

    #[test]
    fn test_non_dyadic_widths_keep_exact_area_units() {
        for width in [5.1_f32, 7.3, 12.7, 19.9, 33.3, 39.9] {
            let layout = compute_floors(&BuildingShape::uniform(width, width, 9.0), &standard_floor());
            let exact = 3.0 * f64::from(width) * f64::from(width);
            assert!((f64::from(layout.total_area) - exact).abs() / exact < 1e-6);

            let span = LevelDensity::homes(width * width, 0.0, 0, true);
            assert_eq!(compute_unit_count(&layout, &span, 1.0), 3, "span, width {width}");
            let per_floor = LevelDensity::homes(width * width, 0.0, 0, false);
            let breakdown = unit_breakdown(&layout, &per_floor, 1.0);
            assert_eq!(breakdown.per_floor, vec![(0, 1), (1, 1), (2, 1)], "width {width}");
        }
    }

    #[test]
    fn test_fixed_count_ignores_geometry_and_multiplier() {
        let density = LevelDensity::fixed(7);
        assert_eq!(compute_unit_count(&FloorLayout::default(), &density, 1.0), 7);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 3.0), 7);
    }

    #[test]
    fn test_zero_area_per_unit_is_fixed_minimum() {
        let density = LevelDensity::homes(0.0, 0.0, 0, true);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 1.0), 1);
    }

    #[test]
    fn test_empty_layout_still_one_unit() {
        let density = LevelDensity::homes(100.0, 0.0, 0, false);
        assert_eq!(compute_unit_count(&FloorLayout::default(), &density, 1.0), 1);
        let span = LevelDensity::homes(100.0, 0.0, 0, true);
        assert_eq!(compute_unit_count(&FloorLayout::default(), &span, 1.0), 1);
    }

    #[test]
    fn test_multiplier_applied_after_rounding() {
        // 1200 m² / 130 = 9.23 -> 9, then x1.5 = 13.5 -> 13.
        let density = LevelDensity::homes(130.0, 0.0, 0, true);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 1.5), 13);
    }

    #[test]
    fn test_empty_percent_and_fixed_whole_building() {
        // (1200 - 200) x 0.8 / 100 = 8.
        let density = LevelDensity::homes(100.0, 200.0, 20, true);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 1.0), 8);
    }

    #[test]
    fn test_empty_pool_consumed_from_lowest_floor() {
        // Pool of 500: floor 0 loses all 400, floor 1 loses 100.
        let layout = layout_of(&[400.0, 400.0, 400.0]);
        let density = LevelDensity::homes(100.0, 500.0, 0, false);
        let breakdown = unit_breakdown(&layout, &density, 1.0);
        assert_eq!(breakdown.per_floor, vec![(0, 0), (1, 3), (2, 4)]);
        assert_eq!(breakdown.total, 7);
    }

    #[test]
    fn test_per_floor_percent_rounds_each_floor() {
        // Each floor: 250 x 0.9 / 100 = 2.25 -> 2.
        let layout = layout_of(&[250.0, 250.0]);
        let density = LevelDensity::homes(100.0, 0.0, 10, false);
        assert_eq!(compute_unit_count(&layout, &density, 1.0), 4);
    }

    #[test]
    fn test_huge_empty_area_clamps_to_one() {
        let density = LevelDensity::homes(100.0, 10_000.0, 0, true);
        assert_eq!(compute_unit_count(&twenty_by_twenty_nine_high(), &density, 1.0), 1);
    }

    #[test]
    fn test_multiplier_monotonic_random_layouts() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let floors: Vec<f32> = (0..rng.gen_range(1..12))
                .map(|_| rng.gen_range(0.0..900.0))
                .collect();
            let layout = layout_of(&floors);
            let density = LevelDensity::homes(
                rng.gen_range(10.0..250.0),
                rng.gen_range(0.0..300.0),
                rng.gen_range(0..60),
                rng.gen_bool(0.5),
            );
            let mut last = 0;
            let mut multiplier = 0.1f32;
            while multiplier < 4.0 {
                let units = compute_unit_count(&layout, &density, multiplier);
                assert!(units >= 1);
                assert!(units >= last, "decreased at multiplier {multiplier}");
                last = units;
                multiplier += 0.1;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Workplace tiers
    // -------------------------------------------------------------------------

    #[test]
    fn test_split_seventeen_by_one_two_one_zero() {
        let tiers = split_workplaces(17, [1, 2, 1, 0]);
        assert_eq!(
            tiers,
            WorkplaceTiers {
                tier0: 5,
                tier1: 8,
                tier2: 4,
                tier3: 0
            }
        );
    }

    #[test]
    fn test_split_without_weights_goes_to_tier_zero() {
        let tiers = split_workplaces(9, [0, 0, 0, 0]);
        assert_eq!(tiers.tier0, 9);
        assert_eq!(tiers.total(), 9);
    }

    #[test]
    fn test_split_conserves_total_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1_000 {
            let total = rng.gen_range(0..50_000);
            let weights = [
                rng.gen_range(0..200),
                rng.gen_range(0..200),
                rng.gen_range(0..200),
                rng.gen_range(0..200),
            ];
            let tiers = split_workplaces(total, weights);
            assert_eq!(tiers.total(), total, "weights {weights:?}");
            assert_eq!(
                tiers.tier0,
                total.saturating_sub(tiers.tier1 + tiers.tier2 + tiers.tier3)
            );
        }
    }

    // -------------------------------------------------------------------------
    // Visitors
    // -------------------------------------------------------------------------

    #[test]
    fn test_staircase_breakpoints() {
        assert_eq!(compress_visitors(150), 150);
        assert_eq!(compress_visitors(200), 200);
        assert_eq!(compress_visitors(250), 237);
        assert_eq!(compress_visitors(400), 350);
        assert_eq!(compress_visitors(450), 375);
        assert_eq!(compress_visitors(600), 450);
        assert_eq!(compress_visitors(700), 475);
    }

    #[test]
    fn test_staircase_is_monotonic_and_sublinear() {
        let mut last = 0;
        for raw in 0..3_000 {
            let v = compress_visitors(raw);
            assert!(v >= last);
            assert!(v <= raw);
            last = v;
        }
    }

    #[test]
    fn test_visitor_minimum_floor() {
        assert_eq!(visitor_demand(1, 100, 100), 5);
        assert_eq!(visitor_demand(0, 100, 100), 5);
    }

    #[test]
    fn test_visitor_demand_scales_then_compresses() {
        // 300 workers x 150% = 450 raw -> 375.
        assert_eq!(visitor_demand(300, 150, 100), 375);
        // Visitor multiplier doubles raw demand before compression.
        assert_eq!(visitor_demand(100, 100, 200), 200);
    }

    #[test]
    fn test_goods_demand_capped() {
        assert_eq!(goods_demand(300, 100, 8_000), 300);
        assert_eq!(goods_demand(300, 250, 8_000), 750);
        assert_eq!(goods_demand(300, 250, 500), 500);
    }

    // -------------------------------------------------------------------------
    // Legacy
    // -------------------------------------------------------------------------

    #[test]
    fn test_legacy_lot_arithmetic() {
        let level = LegacyLevel {
            units_per_hundred_cells: 50,
            minimum: 1,
            workplace_weights: [0; 4],
            visit_percent: 0,
        };
        // 32 x 32 m -> 4 x 4 lot cells -> 16 x 50 / 100 = 8.
        let shape = BuildingShape::uniform(32.0, 32.0, 10.0);
        assert_eq!(legacy_unit_count(&shape, &level, 1.0), 8);
        assert_eq!(legacy_unit_count(&shape, &level, 2.0), 16);
    }

    #[test]
    fn test_legacy_minimum_applies() {
        let level = LegacyLevel {
            units_per_hundred_cells: 10,
            minimum: 3,
            workplace_weights: [0; 4],
            visit_percent: 0,
        };
        let shape = BuildingShape::uniform(8.0, 8.0, 10.0);
        assert_eq!(legacy_unit_count(&shape, &level, 1.0), 3);
        // Never below one even with a tiny multiplier.
        assert_eq!(legacy_unit_count(&shape, &level, 0.01), 1);
    }

    // -------------------------------------------------------------------------
    // Schools
    // -------------------------------------------------------------------------

    fn elementary() -> SchoolPack {
        SchoolPack {
            meta: PackMeta::new("test-school", PackVersion::Custom),
            education_level: EducationLevel::Elementary,
            base_workers: [2, 4, 2, 1],
            students_per_extra_worker: [0, 40, 80, 0],
            base_cost: 10_000,
            cost_per_student: 30,
            base_maintenance: 800,
            maintenance_per_student: 4,
        }
    }

    #[test]
    fn test_school_workers_base_plus_per_student() {
        let workers = school_workers(&elementary(), 300);
        // 300/40 = 7, 300/80 = 3
        assert_eq!(workers.as_array(), [2, 11, 5, 1]);
    }

    #[test]
    fn test_school_workers_no_students() {
        let workers = school_workers(&elementary(), 0);
        assert_eq!(workers.as_array(), [2, 4, 2, 1]);
    }

    #[test]
    fn test_unstaffed_school_still_has_one_worker() {
        let pack = SchoolPack {
            base_workers: [0; 4],
            students_per_extra_worker: [0, 500, 0, 0],
            ..elementary()
        };
        assert_eq!(school_workers(&pack, 120).as_array(), [1, 0, 0, 0]);
        assert_eq!(school_workers(&pack, 1_000).as_array(), [0, 2, 0, 0]);
    }

    #[test]
    fn test_school_costs_linear() {
        let pack = elementary();
        assert_eq!(school_construction_cost(&pack, 100), 13_000);
        assert_eq!(school_maintenance(&pack, 100), 1_200);
    }
}
