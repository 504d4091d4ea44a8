use crate::constants::OVERVIEW_DAY;
use crate::error::Result;
use crate::routes::find_day;
use crate::services::labels::{visible_labels, MarkerView};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MarkersQuery {
    /// Overview (every marker) when absent
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub day: String,
    pub count: usize,
    pub markers: Vec<MarkerView>,
}

/// GET /markers?day=N - Markers of a day with label visibility resolved
pub async fn list_markers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarkersQuery>,
) -> Result<Json<MarkersResponse>> {
    let day = query.day.unwrap_or_else(|| OVERVIEW_DAY.to_string());
    find_day(&state, &day)?;

    let markers = visible_labels(&state.dataset, &day);
    tracing::debug!(
        day = %day,
        markers = markers.len(),
        labels = markers.iter().filter(|m| m.show_label).count(),
        "Markers request"
    );

    Ok(Json(MarkersResponse {
        day,
        count: markers.len(),
        markers,
    }))
}
