use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::categories::{Category, SubCategory};

use super::types::{CacheEntry, CacheStats, EntryFingerprint};

type Slot<V> = Arc<OnceLock<CacheEntry<V>>>;

/// Memo table for one result kind, keyed by building identity.
///
/// Each key owns a `OnceLock`, so concurrent readers of a missing key block on
/// a single computation instead of repeating it. The outer `RwLock` only
/// guards slot creation and eviction.
#[derive(Debug)]
pub struct CacheTable<V> {
    slots: RwLock<HashMap<String, Slot<V>>>,
}

impl<V> Default for CacheTable<V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Copy> CacheTable<V> {
    fn slot(&self, identity: &str) -> Slot<V> {
        {
            let slots = self.slots.read();
            if let Some(slot) = slots.get(identity) {
                return Arc::clone(slot);
            }
        }
        let mut slots = self.slots.write();
        Arc::clone(slots.entry(identity.to_string()).or_default())
    }

    /// Drop `slot` for `identity` unless it has already been replaced.
    fn evict_slot(&self, identity: &str, slot: &Slot<V>) {
        let mut slots = self.slots.write();
        if slots.get(identity).is_some_and(|s| Arc::ptr_eq(s, slot)) {
            slots.remove(identity);
        }
    }

    /// Return level `level_index` for `identity`, computing every level at
    /// most once per fingerprint.
    ///
    /// An entry computed from a different fingerprint is evicted and
    /// recomputed. `None` only if `compute` returns too few levels.
    pub fn get_or_compute<F>(
        &self,
        identity: &str,
        level_index: usize,
        fingerprint: &EntryFingerprint,
        stats: &CacheStats,
        compute: F,
    ) -> Option<V>
    where
        F: Fn() -> Vec<V>,
    {
        for _ in 0..2 {
            let slot = self.slot(identity);
            let mut computed = false;
            let entry = slot.get_or_init(|| {
                computed = true;
                stats.record_computation();
                CacheEntry {
                    fingerprint: fingerprint.clone(),
                    levels: compute(),
                }
            });
            if computed {
                stats.record_miss();
                return entry.levels.get(level_index).copied();
            }
            if entry.fingerprint == *fingerprint {
                stats.record_hit();
                return entry.levels.get(level_index).copied();
            }
            stats.record_stale();
            self.evict_slot(identity, &slot);
        }
        // Another writer keeps replacing the slot; answer without caching.
        stats.record_computation();
        compute().get(level_index).copied()
    }

    /// Peek at a populated entry without computing.
    pub fn get(&self, identity: &str) -> Option<CacheEntry<V>> {
        let slots = self.slots.read();
        slots.get(identity).and_then(|s| s.get().cloned())
    }

    pub fn invalidate(&self, identity: &str) -> bool {
        let mut slots = self.slots.write();
        slots.remove(identity).is_some()
    }

    /// Evict every entry. Returns how many were removed.
    pub fn invalidate_all(&self) -> usize {
        let mut slots = self.slots.write();
        let count = slots.len();
        slots.clear();
        count
    }

    /// Evict entries computed for `category`, optionally only one sub-category.
    /// Slots still being computed are evicted too.
    pub fn invalidate_class(&self, category: Category, sub_category: Option<SubCategory>) -> usize {
        let mut slots = self.slots.write();
        let before = slots.len();
        slots.retain(|_, slot| match slot.get() {
            Some(entry) => {
                entry.fingerprint.category != category
                    || sub_category.is_some_and(|sub| entry.fingerprint.sub_category != sub)
            }
            None => false,
        });
        before - slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
