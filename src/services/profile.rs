use crate::models::DayCollection;
use serde::Serialize;

/// One sample of a day's elevation chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Cumulative distance from the start of the day
    pub distance_km: f64,
    pub elevation_m: f64,
}

/// Elevation against cumulative distance along the day's line features.
/// Distance accumulates within a line part only; the gap between
/// disjoint parts is not walked. Point days have an empty profile.
pub fn elevation_profile(collection: &DayCollection) -> Vec<ProfilePoint> {
    let mut profile = Vec::new();
    let mut travelled = 0.0;

    for geometry in collection.line_features().filter_map(|f| f.geometry.as_ref()) {
        for part in geometry.line_parts() {
            let mut previous = None;
            for point in part {
                if let Some(prev) = previous {
                    travelled += point.coordinates().distance_to(&prev);
                }
                profile.push(ProfilePoint {
                    distance_km: travelled,
                    elevation_m: point.ele,
                });
                previous = Some(point.coordinates());
            }
        }
    }

    profile
}

/// Highest elevation reached on the day, from the geometry.
pub fn max_elevation(profile: &[ProfilePoint]) -> Option<f64> {
    profile
        .iter()
        .map(|p| p.elevation_m)
        .fold(None, |acc, e| Some(acc.map_or(e, |m: f64| m.max(e))))
}
