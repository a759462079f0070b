use std::sync::Arc;

use bevy::prelude::*;

use crate::cache::EntryFingerprint;
use crate::categories::{Category, SubCategory};
use crate::formulas::{
    self, compute_unit_count, legacy_unit_count, split_workplaces, visitor_demand, UnitBreakdown,
    WorkplaceTiers,
};
use crate::geometry::{compute_floors, FloorLayout};
use crate::packs::{CalculationPack, FloorPack, PackSlot, PopulationModel, PopulationPack, SchoolPack};
use crate::prefabs::PrefabRecord;

use super::CalculationContext;

/// Value at a 1-based level of a host table, clamped to the last entry.
fn host_value<T: Copy>(values: &[T], level: u8) -> Option<T> {
    let last = values.len().checked_sub(1)?;
    values.get((usize::from(level.max(1)) - 1).min(last)).copied()
}

// =============================================================================
// Pack resolution
// =============================================================================

impl CalculationContext {
    /// The population pack that applies to a building, ignoring any numeric
    /// population override.
    pub fn active_pack(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> Arc<CalculationPack> {
        self.active_pack_for(PackSlot::Population, identity, category, sub_category)
    }

    pub fn active_pack_for(
        &self,
        slot: PackSlot,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> Arc<CalculationPack> {
        self.resolver
            .resolve(&self.registry, slot, identity, category, sub_category)
    }

    /// The population pack actually used: a synthetic fixed-count pack when
    /// a population override is set, else [`active_pack`](Self::active_pack).
    pub fn effective_population_pack(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> Arc<CalculationPack> {
        match self.population_override(identity) {
            Some(count) => Arc::new(CalculationPack::Population(
                PopulationPack::override_synthetic(identity, count),
            )),
            None => self.active_pack(identity, category, sub_category),
        }
    }

    fn population_and_floor_packs(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
    ) -> Option<(Arc<CalculationPack>, Arc<CalculationPack>)> {
        let population = self.active_pack(identity, category, sub_category);
        let floor = self.active_pack_for(PackSlot::Floor, identity, category, sub_category);
        if population.as_population().is_none() || floor.as_floor().is_none() {
            error!(
                "Packs '{}'/'{}' for '{}' have the wrong kind",
                population.name(),
                floor.name(),
                identity
            );
            return None;
        }
        Some((population, floor))
    }

    fn fingerprint(
        category: Category,
        sub_category: SubCategory,
        population: &CalculationPack,
        floor: &CalculationPack,
        multiplier: f32,
    ) -> EntryFingerprint {
        EntryFingerprint {
            category,
            sub_category,
            population_pack: population.name().to_string(),
            floor_pack: floor.name().to_string(),
            multiplier_bits: multiplier.to_bits(),
        }
    }

    /// Clamp a requested level into `1..=level_count` for the category.
    fn clamp_level(identity: &str, category: Category, level: u8) -> u8 {
        let last = category.level_count().max(1);
        if level == 0 {
            warn!("Level 0 requested for '{}', using level 1", identity);
            return 1;
        }
        if level > last {
            warn!(
                "Level {} requested for '{}' but {} buildings have {} levels",
                level,
                identity,
                category.name(),
                last
            );
            return last;
        }
        level
    }

    fn record(&self, identity: &str) -> Option<&PrefabRecord> {
        let record = self.prefabs.record(identity);
        if record.is_none() {
            warn!("No prefab data for '{}', using minimum capacity", identity);
        }
        record
    }
}

// =============================================================================
// Per-level computation
// =============================================================================

impl CalculationContext {
    /// Primary unit count for every level of a building under one pack pair.
    fn unit_levels(
        &self,
        identity: &str,
        category: Category,
        pack: &PopulationPack,
        floor: &FloorPack,
        multiplier: f32,
    ) -> Vec<u32> {
        let levels = 1..=category.level_count().max(1);
        let Some(record) = self.record(identity) else {
            return levels.map(|_| 1).collect();
        };
        match &pack.model {
            PopulationModel::Volumetric { .. } => {
                let layout = compute_floors(&record.shape, floor);
                levels
                    .map(|level| match pack.density(level) {
                        Some(lookup) => {
                            if lookup.clamped {
                                warn!(
                                    "Pack '{}' has no level {} (building '{}'), using its last level",
                                    pack.meta.name, level, identity
                                );
                            }
                            compute_unit_count(&layout, lookup.record, multiplier)
                        }
                        None => 1,
                    })
                    .collect()
            }
            PopulationModel::Legacy { .. } => levels
                .map(|level| match pack.legacy_level(level) {
                    Some(lookup) => {
                        if lookup.clamped {
                            warn!(
                                "Pack '{}' has no level {} (building '{}'), using its last level",
                                pack.meta.name, level, identity
                            );
                        }
                        legacy_unit_count(&record.shape, lookup.record, multiplier)
                    }
                    None => 1,
                })
                .collect(),
            PopulationModel::Vanilla => levels
                .map(|level| {
                    host_value(&record.host_defaults.population, level)
                        .unwrap_or(1)
                        .max(1)
                })
                .collect(),
        }
    }

    fn workplace_levels(
        &self,
        identity: &str,
        category: Category,
        pack: &PopulationPack,
        floor: &FloorPack,
        multiplier: f32,
    ) -> Vec<WorkplaceTiers> {
        if pack.is_vanilla() {
            let host = self
                .prefabs
                .record(identity)
                .map(|r| r.host_defaults.workplaces.as_slice())
                .unwrap_or_default();
            return (1..=category.level_count().max(1))
                .map(|level| match host_value(host, level) {
                    Some(tiers) if tiers.total() > 0 => tiers,
                    _ => split_workplaces(1, [0; 4]),
                })
                .collect();
        }
        self.unit_levels(identity, category, pack, floor, multiplier)
            .into_iter()
            .zip(1u8..)
            .map(|(total, level)| split_workplaces(total, pack.workplace_weights(level)))
            .collect()
    }

    fn visitor_levels(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        pack: &PopulationPack,
    ) -> Vec<u32> {
        let levels = 1..=category.level_count().max(1);
        if pack.is_vanilla() {
            let host = self
                .prefabs
                .record(identity)
                .map(|r| r.host_defaults.visitors.as_slice())
                .unwrap_or_default();
            return levels
                .map(|level| host_value(host, level).unwrap_or(1))
                .collect();
        }
        let multiplier_pct = self.knobs(category).visitor_multiplier_pct;
        levels
            .map(|level| {
                let jobs = self.workplaces(identity, category, sub_category, level).total();
                visitor_demand(jobs, pack.visit_percent(level), multiplier_pct)
            })
            .collect()
    }
}

// =============================================================================
// Queries
// =============================================================================

impl CalculationContext {
    /// Per-floor areas of a building under its active floor pack.
    pub fn floors(&self, identity: &str, category: Category, sub_category: SubCategory) -> FloorLayout {
        let pack = self.active_pack_for(PackSlot::Floor, identity, category, sub_category);
        match (self.record(identity), pack.as_floor()) {
            (Some(record), Some(floor)) => compute_floors(&record.shape, floor),
            _ => FloorLayout::default(),
        }
    }

    /// Primary capacity of a building: households for residential, total
    /// workplaces for commercial, office and industrial, students for
    /// education. Never below 1.
    ///
    /// A population override wins over every pack.
    pub fn population(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        level: u8,
        multiplier: f32,
    ) -> u32 {
        if let Some(count) = self.population_override(identity) {
            return u32::from(count).max(1);
        }
        let level = Self::clamp_level(identity, category, level);
        let Some((population, floor)) =
            self.population_and_floor_packs(identity, category, sub_category)
        else {
            return 1;
        };
        let (Some(pack), Some(floor_pack)) = (population.as_population(), floor.as_floor()) else {
            return 1;
        };
        let fingerprint =
            Self::fingerprint(category, sub_category, &population, &floor, multiplier);
        self.cache
            .population
            .get_or_compute(
                identity,
                usize::from(level - 1),
                &fingerprint,
                &self.cache.stats,
                || self.unit_levels(identity, category, pack, floor_pack, multiplier),
            )
            .unwrap_or(1)
            .max(1)
    }

    /// Workplaces split across the four education tiers. Residential
    /// buildings have none; schools return their staff.
    pub fn workplaces(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        level: u8,
    ) -> WorkplaceTiers {
        if !category.has_workplaces() {
            return WorkplaceTiers::default();
        }
        if category == Category::Education {
            return self.school_workers(identity);
        }
        let level = Self::clamp_level(identity, category, level);
        let Some((population, floor)) =
            self.population_and_floor_packs(identity, category, sub_category)
        else {
            return split_workplaces(1, [0; 4]);
        };
        let (Some(pack), Some(floor_pack)) = (population.as_population(), floor.as_floor()) else {
            return split_workplaces(1, [0; 4]);
        };

        let pinned = self
            .workplace_override(identity)
            .or_else(|| self.population_override(identity));
        if let Some(count) = pinned {
            return split_workplaces(u32::from(count).max(1), pack.workplace_weights(level));
        }

        let multiplier = self.knobs(category).population_multiplier;
        let fingerprint =
            Self::fingerprint(category, sub_category, &population, &floor, multiplier);
        self.cache
            .workplaces
            .get_or_compute(
                identity,
                usize::from(level - 1),
                &fingerprint,
                &self.cache.stats,
                || self.workplace_levels(identity, category, pack, floor_pack, multiplier),
            )
            .unwrap_or_else(|| split_workplaces(1, [0; 4]))
    }

    /// Visitor places. Only commercial buildings attract visitors.
    pub fn visitors(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        level: u8,
    ) -> u32 {
        if category != Category::Commercial {
            return 0;
        }
        let level = Self::clamp_level(identity, category, level);
        let Some((population, floor)) =
            self.population_and_floor_packs(identity, category, sub_category)
        else {
            return 0;
        };
        let Some(pack) = population.as_population() else {
            return 0;
        };
        let multiplier = self.knobs(category).population_multiplier;
        let fingerprint =
            Self::fingerprint(category, sub_category, &population, &floor, multiplier);
        self.cache
            .visitors
            .get_or_compute(
                identity,
                usize::from(level - 1),
                &fingerprint,
                &self.cache.stats,
                || self.visitor_levels(identity, category, sub_category, pack),
            )
            .unwrap_or(0)
    }

    /// Goods a commercial building sells per cycle, capped by inventory.
    pub fn goods_demand(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        level: u8,
    ) -> u32 {
        if category != Category::Commercial {
            return 0;
        }
        let knobs = self.knobs(category);
        let visitors = self.visitors(identity, category, sub_category, level);
        formulas::goods_demand(visitors, knobs.sales_multiplier_pct, knobs.inventory_cap)
    }

    /// Per-floor unit breakdown, uncached. For diagnostics. A population
    /// override reports its fixed count with no per-floor detail.
    pub fn unit_breakdown(
        &self,
        identity: &str,
        category: Category,
        sub_category: SubCategory,
        level: u8,
        multiplier: f32,
    ) -> UnitBreakdown {
        let total = self.population(identity, category, sub_category, level, multiplier);
        let level = Self::clamp_level(identity, category, level);
        let population = self.effective_population_pack(identity, category, sub_category);
        let density = population.as_population().and_then(|p| p.density(level));
        let Some(density) = density else {
            return UnitBreakdown {
                per_floor: Vec::new(),
                total,
            };
        };
        let layout = self.floors(identity, category, sub_category);
        formulas::unit_breakdown(&layout, density.record, multiplier)
    }
}

// =============================================================================
// Schools
// =============================================================================

impl CalculationContext {
    fn school_sub_category(&self, identity: &str) -> SubCategory {
        match self.prefabs.record(identity) {
            Some(record) if record.category == Category::Education => record.sub_category,
            Some(record) => {
                warn!(
                    "'{}' is a {} building, not a school",
                    identity,
                    record.category.name()
                );
                SubCategory::ElementarySchool
            }
            None => {
                warn!("No prefab data for school '{}'", identity);
                SubCategory::ElementarySchool
            }
        }
    }

    fn school_pack(&self, identity: &str) -> Option<(Arc<CalculationPack>, u32)> {
        let sub_category = self.school_sub_category(identity);
        let pack =
            self.active_pack_for(PackSlot::School, identity, Category::Education, sub_category);
        if pack.as_school().is_none() {
            error!("Pack '{}' for school '{}' is not a school pack", pack.name(), identity);
            return None;
        }
        Some((pack, self.students_for(identity, sub_category)))
    }

    fn with_school<T>(&self, identity: &str, f: impl FnOnce(&SchoolPack, u32) -> T) -> Option<T> {
        let (pack, students) = self.school_pack(identity)?;
        pack.as_school().map(|school| f(school, students))
    }

    fn students_for(&self, identity: &str, sub_category: SubCategory) -> u32 {
        let multiplier = self.knobs(Category::Education).population_multiplier;
        self.population(identity, Category::Education, sub_category, 1, multiplier)
    }

    /// Student capacity of a school.
    pub fn students(&self, identity: &str) -> u32 {
        let sub_category = self.school_sub_category(identity);
        self.students_for(identity, sub_category)
    }

    pub fn school_workers(&self, identity: &str) -> WorkplaceTiers {
        self.with_school(identity, formulas::school_workers)
            .unwrap_or_else(|| split_workplaces(1, [0; 4]))
    }

    pub fn school_construction_cost(&self, identity: &str) -> u64 {
        self.with_school(identity, formulas::school_construction_cost)
            .unwrap_or_default()
    }

    pub fn school_maintenance(&self, identity: &str) -> u64 {
        self.with_school(identity, formulas::school_maintenance)
            .unwrap_or_default()
    }
}
