pub mod memory;

pub use memory::SegmentCache;

use serde::{Deserialize, Serialize};

/// Cache key for a day's colored segment list.
pub fn segments_cache_key(day: &str) -> String {
    format!("segments:day:{}", day)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}
