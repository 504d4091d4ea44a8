//! Elevation-to-color mapping for route polylines.

use crate::constants::{ELEVATION_MAX_M, ELEVATION_MIN_M};

/// Low-to-high elevation palette: valley greens through yellow and orange
/// to the reds and purple of the high passes.
pub const ELEVATION_PALETTE: [&str; 11] = [
    "#1a9850", "#66bd63", "#a6d96a", "#d9ef8b", "#ffffbf", "#fee08b", "#fdae61", "#f46d43",
    "#d73027", "#a50026", "#6a0061",
];

/// Position of an elevation on the color scale, clamped to `[0, 1]`.
/// Non-finite elevations sit at the bottom of the scale.
pub fn normalize_elevation(elevation_m: f64) -> f64 {
    if !elevation_m.is_finite() {
        return 0.0;
    }
    ((elevation_m - ELEVATION_MIN_M) / (ELEVATION_MAX_M - ELEVATION_MIN_M)).clamp(0.0, 1.0)
}

/// Palette index for an elevation in meters.
pub fn palette_index(elevation_m: f64) -> usize {
    let last = ELEVATION_PALETTE.len() - 1;
    (normalize_elevation(elevation_m) * last as f64).round() as usize
}

/// Color for an elevation in meters.
pub fn color_for(elevation_m: f64) -> &'static str {
    ELEVATION_PALETTE[palette_index(elevation_m)]
}
