//! Resolves the map frame for a day.
//!
//! Resolution order:
//! 1. the precomputed table entry for the day and device mode, when it is
//!    structurally valid;
//! 2. the envelope of the day's line features (points of interest never
//!    count), padded like the table;
//! 3. nothing, in which case the caller keeps the current viewport.

use crate::dataset::TrekDataset;
use crate::models::{Bounds, DayCollection, DeviceMode};
use geo::{BoundingRect, LineString, MultiLineString};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsSource {
    Precomputed,
    Geometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedBounds {
    pub bounds: Bounds,
    pub source: BoundsSource,
}

/// Frame for `day` on `mode`, or `None` when neither the table nor the
/// geometry can produce one.
pub fn resolve_bounds(dataset: &TrekDataset, day: &str, mode: DeviceMode) -> Option<Bounds> {
    resolve_bounds_with_source(dataset, day, mode).map(|r| r.bounds)
}

pub fn resolve_bounds_with_source(
    dataset: &TrekDataset,
    day: &str,
    mode: DeviceMode,
) -> Option<ResolvedBounds> {
    if let Some(bounds) = precomputed_bounds(dataset, day, mode) {
        return Some(ResolvedBounds {
            bounds,
            source: BoundsSource::Precomputed,
        });
    }

    let Some(collection) = dataset.day(day) else {
        tracing::debug!(day, "No precomputed bounds and no such day");
        return None;
    };

    match geometry_bounds(collection, mode) {
        Some(bounds) => {
            tracing::debug!(day, %mode, "Bounds resolved from route geometry");
            Some(ResolvedBounds {
                bounds,
                source: BoundsSource::Geometry,
            })
        }
        None => {
            tracing::debug!(day, %mode, "No line geometry; keeping current viewport");
            None
        }
    }
}

/// Table lookup. A present but malformed entry is logged and ignored.
pub fn precomputed_bounds(dataset: &TrekDataset, day: &str, mode: DeviceMode) -> Option<Bounds> {
    let value = dataset.bounds_entry(day)?.for_mode(mode)?;
    let bounds = Bounds::from_corner_pairs(value);
    if bounds.is_none() {
        tracing::warn!(day, %mode, "Ignoring malformed precomputed bounds entry");
    }
    bounds
}

/// Raw envelope of every coordinate of the day's line features.
pub fn line_envelope(collection: &DayCollection) -> Option<Bounds> {
    let lines: Vec<LineString<f64>> = collection
        .line_features()
        .filter_map(|f| f.geometry.as_ref())
        .flat_map(|g| g.line_parts())
        .map(|part| LineString::from(part.iter().map(|p| (p.lon, p.lat)).collect::<Vec<_>>()))
        .collect();

    MultiLineString::new(lines)
        .bounding_rect()
        .map(Bounds::from_rect)
}

/// Line envelope padded with the mode's ratio, matching how the offline
/// table is derived.
pub fn geometry_bounds(collection: &DayCollection, mode: DeviceMode) -> Option<Bounds> {
    line_envelope(collection).map(|b| b.pad(mode.padding_ratio()))
}
