use std::sync::atomic::{AtomicU64, Ordering};

use crate::categories::{Category, SubCategory};

/// The inputs a cache entry was computed from.
///
/// A lookup whose fingerprint differs from the stored one is a forced miss.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFingerprint {
    pub category: Category,
    pub sub_category: SubCategory,
    pub population_pack: String,
    pub floor_pack: String,
    /// `f32::to_bits` of the multiplier the entry was computed with.
    pub multiplier_bits: u32,
}

/// Results for every level of one building, computed together.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub fingerprint: EntryFingerprint,
    pub levels: Vec<V>,
}

/// Lookup counters shared by every table of a cache.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    stale: AtomicU64,
}

impl CacheStats {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_computation(&self) {
        self.computations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale(&self) {
        self.stale.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of times an entry was actually computed.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Number of entries discarded because their fingerprint no longer matched.
    pub fn stale(&self) -> u64 {
        self.stale.load(Ordering::Relaxed)
    }
}
