mod result_cache;
mod table;
mod types;

pub use result_cache::ResultCache;
pub use table::CacheTable;
pub use types::{CacheEntry, CacheStats, EntryFingerprint};
