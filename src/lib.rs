// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::SegmentCache;
use config::Config;
use dataset::TrekDataset;

// App state for sharing across the application
pub struct AppState {
    pub dataset: TrekDataset,
    pub segment_cache: SegmentCache,
    pub config: Config,
}

impl AppState {
    pub fn new(dataset: TrekDataset, config: Config) -> Self {
        AppState {
            segment_cache: SegmentCache::new(config.segment_cache_max_entries),
            dataset,
            config,
        }
    }
}
