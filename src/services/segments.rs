//! Gradient segment builder: turns route lines into two-point segments,
//! each colored by the elevation of its leading point, so a route renders
//! as a continuous elevation gradient.

use crate::models::{DayCollection, TrackGeometry, TrackPoint};
use crate::services::color::color_for;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredSegment {
    pub start: TrackPoint,
    pub end: TrackPoint,
    pub color: &'static str,
}

/// Build colored segments from one or more line parts. Consecutive
/// segments within a part share an endpoint; parts are never joined.
pub fn build_segments(parts: &[Vec<TrackPoint>]) -> Vec<ColoredSegment> {
    let total: usize = parts.iter().map(|p| p.len().saturating_sub(1)).sum();
    let mut segments = Vec::with_capacity(total);

    for part in parts {
        segments.extend(part.windows(2).map(|pair| ColoredSegment {
            start: pair[0],
            end: pair[1],
            color: color_for(pair[0].ele),
        }));
    }

    segments
}

/// Segments for every line feature of a day, in feature order. Point
/// features contribute nothing.
pub fn segments_for_day(collection: &DayCollection) -> Vec<ColoredSegment> {
    collection
        .line_features()
        .filter_map(|f| f.geometry.as_ref())
        .flat_map(|g| match g {
            TrackGeometry::Line(parts) => build_segments(parts),
            TrackGeometry::Point(_) => Vec::new(),
        })
        .collect()
}
