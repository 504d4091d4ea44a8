//! Dashboard metrics for the current day, formatted for the chosen unit.
//!
//! Values in the dataset are free text. Anything that does not parse
//! renders as an empty string rather than an error.

use crate::models::{DayProperties, Feet, Unit};
use serde::Serialize;

pub const ASCENT_GLYPH: char = '↑';
pub const DESCENT_GLYPH: char = '↓';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMetrics {
    pub day: String,
    pub unit: Unit,
    pub name: String,
    pub distance: String,
    pub time: String,
    pub start_altitude: String,
    pub end_altitude: String,
    pub peak_altitude: String,
    pub ascent: String,
    pub descent: String,
}

impl DayMetrics {
    pub fn for_day(properties: &DayProperties, unit: Unit) -> Self {
        DayMetrics {
            day: properties.day.clone(),
            unit,
            name: properties.name.clone().unwrap_or_default(),
            distance: format_distance(properties.distance.as_deref(), unit),
            time: properties.time.as_deref().unwrap_or_default().trim().to_string(),
            start_altitude: format_altitude(properties.start_alt.as_deref(), unit),
            end_altitude: format_altitude(properties.end_alt.as_deref(), unit),
            peak_altitude: format_altitude(properties.peak_alt.as_deref(), unit),
            ascent: format_height_change(properties.total_climb.as_deref(), unit, ASCENT_GLYPH),
            descent: format_height_change(properties.total_descent.as_deref(), unit, DESCENT_GLYPH),
        }
    }
}

/// Parse a comma-formatted feet value such as `"17,598"`.
pub fn parse_feet(raw: Option<&str>) -> Option<Feet> {
    let cleaned: String = raw?.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Feet)
}

/// `"2,860 m"` for km, `"9,383 ft"` for ft, empty when unparseable.
pub fn format_altitude(raw: Option<&str>, unit: Unit) -> String {
    match parse_feet(raw) {
        Some(feet) => match unit {
            Unit::Km => feet.to_meters().to_string(),
            Unit::Ft => feet.to_string(),
        },
        None => String::new(),
    }
}

/// A climb or descent prefixed with its glyph, e.g. `"↑ 152 m"`.
pub fn format_height_change(raw: Option<&str>, unit: Unit, glyph: char) -> String {
    let value = format_altitude(raw, unit);
    if value.is_empty() {
        return value;
    }
    format!("{} {}", glyph, value)
}

/// Pick the half of `"4.8 mi / 7.7 km"` matching the unit. Text without a
/// matching half is shown as-is.
pub fn format_distance(raw: Option<&str>, unit: Unit) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let suffix = match unit {
        Unit::Km => "km",
        Unit::Ft => "mi",
    };
    raw.split('/')
        .map(str::trim)
        .find(|part| part.ends_with(suffix))
        .unwrap_or_else(|| raw.trim())
        .to_string()
}
