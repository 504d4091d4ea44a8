use crate::services::validation::check_bounds_table;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Dataset and cache status
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    status["checks"]["days"] = json!(state.dataset.len());
    status["checks"]["markers"] = json!(state.dataset.markers().len());

    // Drift between the bounds table and the routes
    let issues = check_bounds_table(&state.dataset);
    if issues.is_empty() {
        status["checks"]["bounds_table"] = json!("ok");
    } else {
        tracing::warn!(issues = issues.len(), "Bounds table does not match route geometry");
        status["checks"]["bounds_table"] = json!({
            "issues": issues.iter().map(ToString::to_string).collect::<Vec<_>>()
        });
        status["status"] = json!("degraded");
    }

    status["checks"]["segment_cache"] = json!(state.segment_cache.stats());

    Json(status)
}
