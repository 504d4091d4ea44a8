pub mod days;
pub mod debug;
pub mod markers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::DayCollection;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/days", get(days::list_days))
        .route("/days/{day}", get(days::get_day))
        .route("/days/{day}/bounds", get(days::day_bounds))
        .route("/days/{day}/segments", get(days::day_segments))
        .route("/days/{day}/profile", get(days::day_profile))
        .route("/days/{day}/dashboard", get(days::day_dashboard))
        .route("/days/{day}/next", get(days::next_day))
        .route("/days/{day}/previous", get(days::previous_day))
        .route("/markers", get(markers::list_markers))
        .route("/state", get(state::initial_state))
        .route("/state/transition", post(state::apply_transition))
        .route("/state/key", post(state::handle_key))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}

/// Look up a day or answer 404.
pub(crate) fn find_day<'a>(state: &'a AppState, day: &str) -> Result<&'a DayCollection> {
    state
        .dataset
        .day(day)
        .ok_or_else(|| AppError::NotFound(format!("Unknown day: {}", day)))
}
