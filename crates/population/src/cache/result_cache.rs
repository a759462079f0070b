use bevy::prelude::*;

use crate::categories::{Category, ResultKind, SubCategory};
use crate::formulas::WorkplaceTiers;

use super::table::CacheTable;
use super::types::CacheStats;

/// Per-building memo of population, workplace and visitor results.
///
/// Entries are created lazily on first query and removed eagerly on
/// invalidation; nothing expires on its own.
#[derive(Debug, Default)]
pub struct ResultCache {
    pub population: CacheTable<u32>,
    pub workplaces: CacheTable<WorkplaceTiers>,
    pub visitors: CacheTable<u32>,
    pub stats: CacheStats,
}

impl ResultCache {
    pub fn invalidate(&self, identity: &str, kind: ResultKind) -> bool {
        match kind {
            ResultKind::Population => self.population.invalidate(identity),
            ResultKind::Workplaces => self.workplaces.invalidate(identity),
            ResultKind::Visitors => self.visitors.invalidate(identity),
        }
    }

    /// Evict one building from every table.
    pub fn invalidate_building(&self, identity: &str) -> bool {
        let mut any = false;
        for kind in ResultKind::ALL {
            any |= self.invalidate(identity, kind);
        }
        any
    }

    pub fn invalidate_all(&self, kind: ResultKind) -> usize {
        match kind {
            ResultKind::Population => self.population.invalidate_all(),
            ResultKind::Workplaces => self.workplaces.invalidate_all(),
            ResultKind::Visitors => self.visitors.invalidate_all(),
        }
    }

    /// Evict every entry of every kind.
    pub fn clear(&self) -> usize {
        let evicted = ResultKind::ALL
            .iter()
            .map(|&kind| self.invalidate_all(kind))
            .sum();
        debug!("ResultCache: cleared {} entries", evicted);
        evicted
    }

    /// Evict every entry computed for a building class, across all kinds.
    pub fn invalidate_class(&self, category: Category, sub_category: Option<SubCategory>) -> usize {
        let evicted = self.population.invalidate_class(category, sub_category)
            + self.workplaces.invalidate_class(category, sub_category)
            + self.visitors.invalidate_class(category, sub_category);
        debug!(
            "ResultCache: evicted {} entries for {:?}/{:?}",
            evicted, category, sub_category
        );
        evicted
    }

    pub fn len(&self, kind: ResultKind) -> usize {
        match kind {
            ResultKind::Population => self.population.len(),
            ResultKind::Workplaces => self.workplaces.len(),
            ResultKind::Visitors => self.visitors.len(),
        }
    }
}
