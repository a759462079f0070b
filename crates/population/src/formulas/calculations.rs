use crate::config::{
    MIN_VISITORS, TIER_COUNT, UNIT_ROUNDING_SLACK, VISITOR_BAND_RATES, VISITOR_BAND_WIDTH,
};
use crate::geometry::FloorLayout;
use crate::packs::LevelDensity;

use super::types::{UnitBreakdown, WorkplaceTiers};

// =============================================================================
// Unit counts
// =============================================================================

fn whole_units(value: f64) -> f64 {
    (value * (1.0 + UNIT_ROUNDING_SLACK)).floor()
}

/// Units for a floor layout under one level's density, with per-floor detail.
///
/// - `area_per_unit <= 0`: a fixed `-area_per_unit` units; the multiplier is ignored.
/// - Units spanning all floors: one whole-building division, rounded down,
///   then scaled by `multiplier` and rounded down again.
/// - Otherwise floors are counted one at a time in index order. The fixed
///   empty area is drawn from the lowest floors first.
///
/// The total is never below 1.
pub fn unit_breakdown(layout: &FloorLayout, density: &LevelDensity, multiplier: f32) -> UnitBreakdown {
    let multiplier = f64::from(multiplier);
    if density.area_per_unit <= 0.0 {
        let fixed = (-f64::from(density.area_per_unit)).floor() as u32;
        return UnitBreakdown {
            per_floor: Vec::new(),
            total: fixed.max(1),
        };
    }

    let area_per_unit = f64::from(density.area_per_unit);
    let usable_fraction = 1.0 - f64::from(density.empty_area_percent.min(100)) / 100.0;

    if density.units_span_all_floors {
        let area = (f64::from(layout.total_area) - f64::from(density.empty_area_fixed)).max(0.0);
        let units = whole_units(area * usable_fraction / area_per_unit);
        let total = whole_units(units * multiplier) as u32;
        return UnitBreakdown {
            per_floor: Vec::new(),
            total: total.max(1),
        };
    }

    let mut empty_pool = f64::from(density.empty_area_fixed).max(0.0);
    let mut per_floor = Vec::with_capacity(layout.floors.len());
    let mut total: u32 = 0;
    for (&index, &floor_area) in &layout.floors {
        let floor_area = f64::from(floor_area);
        let taken = empty_pool.min(floor_area);
        empty_pool -= taken;
        let units = whole_units((floor_area - taken) * usable_fraction / area_per_unit);
        let scaled = whole_units(units * multiplier) as u32;
        per_floor.push((index, scaled));
        total = total.saturating_add(scaled);
    }

    UnitBreakdown {
        per_floor,
        total: total.max(1),
    }
}

/// Unit count only. See [`unit_breakdown`].
pub fn compute_unit_count(layout: &FloorLayout, density: &LevelDensity, multiplier: f32) -> u32 {
    unit_breakdown(layout, density, multiplier).total
}

// =============================================================================
// Workplace tiers
// =============================================================================

/// Split `total` workplaces by proportional `weights`.
///
/// Tiers 1..=3 get `floor(total * w / W)`; tier 0 takes the rest. With no
/// weight data every workplace lands in tier 0.
pub fn split_workplaces(total: u32, weights: [u16; TIER_COUNT]) -> WorkplaceTiers {
    let weight_sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if weight_sum == 0 {
        return WorkplaceTiers {
            tier0: total,
            ..Default::default()
        };
    }
    let share = |w: u16| (u64::from(total) * u64::from(w) / weight_sum) as u32;
    let tier1 = share(weights[1]);
    let tier2 = share(weights[2]);
    let tier3 = share(weights[3]);
    WorkplaceTiers {
        tier0: total.saturating_sub(tier1 + tier2 + tier3),
        tier1,
        tier2,
        tier3,
    }
}

// =============================================================================
// Visitors and goods
// =============================================================================

/// Diminishing-returns compression of raw visitor demand.
///
/// Each 200-wide band counts at a lower marginal rate (100%, 75%, 50%), and
/// everything past 600 counts at 25%. Monotonic, never capped.
pub fn compress_visitors(raw: u32) -> u32 {
    let last = VISITOR_BAND_RATES.len() - 1;
    let mut remaining = u64::from(raw);
    let mut weighted: u64 = 0;
    for (i, &rate) in VISITOR_BAND_RATES.iter().enumerate() {
        let band = if i == last {
            remaining
        } else {
            remaining.min(u64::from(VISITOR_BAND_WIDTH))
        };
        weighted += band * u64::from(rate);
        remaining -= band;
        if remaining == 0 {
            break;
        }
    }
    (weighted / 100) as u32
}

/// Visitor places for a commercial building with `workplaces` jobs.
///
/// Raw demand is `workplaces x visit% x multiplier%`. Demand under the
/// minimum is raised to it; anything else goes through the staircase.
pub fn visitor_demand(workplaces: u32, visit_percent: u16, multiplier_pct: u16) -> u32 {
    let raw = u64::from(workplaces) * u64::from(visit_percent) / 100 * u64::from(multiplier_pct)
        / 100;
    let raw = raw.min(u64::from(u32::MAX)) as u32;
    if raw < MIN_VISITORS {
        MIN_VISITORS
    } else {
        compress_visitors(raw)
    }
}

/// Goods a shop moves per cycle: visitors scaled by the sales multiplier,
/// capped by inventory.
pub fn goods_demand(visitors: u32, sales_multiplier_pct: u16, inventory_cap: u32) -> u32 {
    let goods = u64::from(visitors) * u64::from(sales_multiplier_pct) / 100;
    goods.min(u64::from(inventory_cap)) as u32
}
