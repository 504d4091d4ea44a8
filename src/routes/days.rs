use crate::error::{AppError, Result};
use crate::models::{Bounds, DayProperties, DeviceMode, Unit};
use crate::routes::find_day;
use crate::services::bounds_resolver::{resolve_bounds_with_source, BoundsSource};
use crate::services::dashboard::DayMetrics;
use crate::services::navigator::DayNavigator;
use crate::services::profile::{elevation_profile, max_elevation, ProfilePoint};
use crate::services::segments::ColoredSegment;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `?mode=desktop|mobile`, desktop when absent
#[derive(Debug, Deserialize)]
pub struct ModeQuery {
    #[serde(default)]
    pub mode: Option<String>,
}

impl ModeQuery {
    pub fn device_mode(&self) -> Result<DeviceMode> {
        match self.mode.as_deref() {
            None | Some("") => Ok(DeviceMode::Desktop),
            Some(raw) => raw.parse().map_err(AppError::InvalidRequest),
        }
    }
}

/// `?unit=km|ft`, km when absent
#[derive(Debug, Deserialize)]
pub struct UnitQuery {
    #[serde(default)]
    pub unit: Option<String>,
}

impl UnitQuery {
    pub fn unit(&self) -> Result<Unit> {
        match self.unit.as_deref() {
            None | Some("") => Ok(Unit::Km),
            Some(raw) => raw.parse().map_err(AppError::InvalidRequest),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub day: String,
    pub name: Option<String>,
    /// Rest days and the overview have no route line
    pub is_point_day: bool,
    pub marker_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DaysResponse {
    pub days: Vec<DaySummary>,
    pub count: usize,
}

/// GET /days - Every day of the itinerary in order
pub async fn list_days(State(state): State<Arc<AppState>>) -> Json<DaysResponse> {
    let days: Vec<DaySummary> = state
        .dataset
        .days()
        .map(|d| DaySummary {
            day: d.day.clone(),
            name: d.properties().and_then(|p| p.name.clone()),
            is_point_day: d.is_point_day(),
            marker_count: state.dataset.markers_for_day(&d.day).len(),
        })
        .collect();

    Json(DaysResponse {
        count: days.len(),
        days,
    })
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub day: String,
    pub properties: Option<DayProperties>,
    pub is_point_day: bool,
    pub geojson: geojson::FeatureCollection,
}

/// GET /days/{day} - Day metadata and its raw feature collection
pub async fn get_day(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<DayResponse>> {
    let collection = find_day(&state, &day)?;

    Ok(Json(DayResponse {
        day: collection.day.clone(),
        properties: collection.properties().cloned(),
        is_point_day: collection.is_point_day(),
        geojson: collection.source.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    pub day: String,
    pub mode: DeviceMode,
    /// `null` tells the map to keep its current viewport
    pub bounds: Option<Bounds>,
    pub source: Option<BoundsSource>,
}

/// GET /days/{day}/bounds - Frame to fit the map to
pub async fn day_bounds(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    Query(query): Query<ModeQuery>,
) -> Result<Json<BoundsResponse>> {
    let mode = query.device_mode()?;
    find_day(&state, &day)?;

    let resolved = resolve_bounds_with_source(&state.dataset, &day, mode);
    tracing::info!(
        day = %day,
        %mode,
        source = ?resolved.map(|r| r.source),
        "Bounds request"
    );

    Ok(Json(BoundsResponse {
        day,
        mode,
        bounds: resolved.map(|r| r.bounds),
        source: resolved.map(|r| r.source),
    }))
}

#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub day: String,
    pub count: usize,
    pub segments: Vec<ColoredSegment>,
}

/// GET /days/{day}/segments - Elevation-colored route segments
pub async fn day_segments(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<SegmentsResponse>> {
    let collection = find_day(&state, &day)?;
    let segments = state.segment_cache.get_or_build(collection).await;

    Ok(Json(SegmentsResponse {
        day,
        count: segments.len(),
        segments: segments.as_ref().clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub day: String,
    pub max_elevation_m: Option<f64>,
    pub points: Vec<ProfilePoint>,
}

/// GET /days/{day}/profile - Elevation against distance
pub async fn day_profile(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let collection = find_day(&state, &day)?;
    let points = elevation_profile(collection);

    Ok(Json(ProfileResponse {
        day,
        max_elevation_m: max_elevation(&points),
        points,
    }))
}

/// GET /days/{day}/dashboard - Day metrics in the requested unit
pub async fn day_dashboard(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    Query(query): Query<UnitQuery>,
) -> Result<Json<DayMetrics>> {
    let unit = query.unit()?;
    let properties = find_day(&state, &day)?
        .properties()
        .ok_or_else(|| AppError::NotFound(format!("No metrics for day {}", day)))?;

    Ok(Json(DayMetrics::for_day(properties, unit)))
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// Day the step started from, as sent by the client
    pub from: String,
    pub day: String,
    pub properties: DayProperties,
    pub metrics: Option<DayMetrics>,
}

/// GET /days/{day}/next - The day after, wrapping to the first
pub async fn next_day(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    Query(query): Query<UnitQuery>,
) -> Result<Json<NavigationResponse>> {
    navigate(&state, day, query.unit()?, Step::Next)
}

/// GET /days/{day}/previous - The day before, wrapping to the last
pub async fn previous_day(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    Query(query): Query<UnitQuery>,
) -> Result<Json<NavigationResponse>> {
    navigate(&state, day, query.unit()?, Step::Previous)
}

enum Step {
    Next,
    Previous,
}

fn navigate(
    state: &AppState,
    from: String,
    unit: Unit,
    step: Step,
) -> Result<Json<NavigationResponse>> {
    let mut navigator = DayNavigator::new(&state.dataset);
    let mut metrics = None;
    let dispatch = |props: &DayProperties| metrics = Some(DayMetrics::for_day(props, unit));

    let target = match step {
        Step::Next => navigator.next(&from, dispatch),
        Step::Previous => navigator.previous(&from, dispatch),
    };

    Ok(Json(NavigationResponse {
        from,
        day: target.day,
        properties: target.properties.clone(),
        metrics,
    }))
}
