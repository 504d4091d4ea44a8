//! Stable application-wide constants.
//!
//! Values here are structural invariants of the trek dataset, rendering
//! coefficients, and default fallbacks for env-var-based configuration.
//! They should rarely change.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Preferences ---

/// Default lifetime of the preference cookies: one year.
/// Overridden by `PREFERENCE_COOKIE_MAX_AGE_DAYS`.
pub const DEFAULT_PREFERENCE_COOKIE_MAX_AGE_DAYS: i64 = 365;
/// Cookie key holding the display unit (`km` or `ft`).
pub const UNIT_COOKIE: &str = "unit";
/// Cookie key holding the legend visibility flag (`true` or `false`).
pub const LEGEND_COOKIE: &str = "legend";

// --- Segment cache ---

/// Maximum number of per-day segment lists kept in memory.
/// The dataset has 21 days, so the default never evicts.
pub const DEFAULT_SEGMENT_CACHE_MAX_ENTRIES: u64 = 64;

// --- Elevation color scale ---

/// Elevation (meters) mapped to the first palette entry.
pub const ELEVATION_MIN_M: f64 = 2600.0;
/// Elevation (meters) mapped to the last palette entry.
pub const ELEVATION_MAX_M: f64 = 5500.0;

// --- Bounds padding ---
// Ratios applied to the raw route envelope, as Leaflet's `LatLngBounds.pad`:
// each side grows by `ratio * span`.

/// Padding ratio for desktop viewports.
pub const DESKTOP_BOUNDS_PADDING: f64 = 0.10;
/// Padding ratio for mobile viewports (more room for the dashboard overlay).
pub const MOBILE_BOUNDS_PADDING: f64 = 0.25;
/// Maximum per-corner difference (degrees) tolerated between the
/// precomputed bounds table and the envelope derived from the geometry.
pub const BOUNDS_DRIFT_TOLERANCE_DEG: f64 = 1e-4;

// --- Initial view ---

/// Day selected when nothing else is known.
pub const DEFAULT_DAY: &str = "1";
/// Identifier of the overview/landing day.
pub const OVERVIEW_DAY: &str = "0";
/// Zoom level of the overview frame.
pub const DEFAULT_ZOOM: f64 = 11.0;
/// Zoom level used when flying to a rest-day point.
pub const POINT_DAY_ZOOM: f64 = 14.0;
/// Overview center, roughly between Lukla and Gokyo.
pub const DEFAULT_CENTER_LAT: f64 = 27.87;
/// Overview center, roughly between Lukla and Gokyo.
pub const DEFAULT_CENTER_LNG: f64 = 86.77;

/// Default duration of animated pans and zooms.
/// Overridden by `ANIMATION_DURATION_MS`.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 1_000;

// --- Unit conversion ---

/// Meters per international foot.
pub const METERS_PER_FOOT: f64 = 0.3048;
