use crate::cache::{segments_cache_key, CacheStats};
use crate::models::DayCollection;
use crate::services::segments::{segments_for_day, ColoredSegment};
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory memo of per-day colored segments, backed by moka with bounded
/// capacity. The dataset never changes, so entries never expire.
/// All methods take `&self`.
pub struct SegmentCache {
    segments: Cache<String, Arc<Vec<ColoredSegment>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SegmentCache {
    pub fn new(max_capacity: u64) -> Self {
        let segments = Cache::builder().max_capacity(max_capacity).build();

        SegmentCache {
            segments,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Segments for `collection`, built on first request.
    pub async fn get_or_build(&self, collection: &DayCollection) -> Arc<Vec<ColoredSegment>> {
        let key = segments_cache_key(&collection.day);

        if let Some(cached) = self.segments.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Segment cache hit: {}", key);
            return cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let built = Arc::new(segments_for_day(collection));
        tracing::debug!("Segment cache miss: {} ({} segments built)", key, built.len());
        self.segments.insert(key, Arc::clone(&built)).await;
        built
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.segments.entry_count(),
        }
    }
}
