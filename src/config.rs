use crate::constants::*;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Lifetime of the `unit` / `legend` preference cookies
    pub preference_cookie_max_age_days: i64,
    /// Capacity of the per-day segment cache
    pub segment_cache_max_entries: u64,
    /// Duration attached to pan/zoom commands sent to the map
    pub animation_duration_ms: u64,
    /// Directory holding the built front end, served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.parse().unwrap_or(3000),
            preference_cookie_max_age_days: DEFAULT_PREFERENCE_COOKIE_MAX_AGE_DAYS,
            segment_cache_max_entries: DEFAULT_SEGMENT_CACHE_MAX_ENTRIES,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let preference_cookie_max_age_days: i64 = env::var("PREFERENCE_COOKIE_MAX_AGE_DAYS")
            .unwrap_or_else(|_| DEFAULT_PREFERENCE_COOKIE_MAX_AGE_DAYS.to_string())
            .parse()
            .map_err(|_| "Invalid PREFERENCE_COOKIE_MAX_AGE_DAYS")?;

        if !(1..=3650).contains(&preference_cookie_max_age_days) {
            return Err("PREFERENCE_COOKIE_MAX_AGE_DAYS must be between 1 and 3650".to_string());
        }

        let segment_cache_max_entries: u64 = env::var("SEGMENT_CACHE_MAX_ENTRIES")
            .unwrap_or_else(|_| DEFAULT_SEGMENT_CACHE_MAX_ENTRIES.to_string())
            .parse()
            .map_err(|_| "Invalid SEGMENT_CACHE_MAX_ENTRIES")?;

        if segment_cache_max_entries == 0 {
            return Err("SEGMENT_CACHE_MAX_ENTRIES must be greater than 0".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            preference_cookie_max_age_days,
            segment_cache_max_entries,
            animation_duration_ms: env::var("ANIMATION_DURATION_MS")
                .unwrap_or_else(|_| DEFAULT_ANIMATION_DURATION_MS.to_string())
                .parse()
                .map_err(|_| "Invalid ANIMATION_DURATION_MS")?,
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
