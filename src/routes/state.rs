//! View-state endpoints.
//!
//! The server keeps no per-client view state. The client sends back the
//! state it holds with every request and receives the next state plus the
//! viewport command to run. Preference changes come back as cookies.

use crate::error::{AppError, Result};
use crate::models::{DeviceMode, Transition, ViewState};
use crate::services::controller::{KeyInput, TrekController, ViewCommand};
use crate::services::preferences::CookieStore;
use crate::services::store::ViewStore;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub mobile: bool,
}

#[derive(Debug, Serialize)]
pub struct InitialStateResponse {
    pub mode: DeviceMode,
    pub state: ViewState,
}

/// GET /state?mobile=bool - Initial view state with restored preferences
pub async fn initial_state(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DeviceQuery>,
) -> Json<InitialStateResponse> {
    let mode = DeviceMode::from_mobile_flag(query.mobile);
    let cookies = cookie_store(&state, &headers);
    let store = ViewStore::new(cookies, mode);

    Json(InitialStateResponse {
        mode,
        state: store.state().clone(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub state: ViewState,
    pub transition: Transition,
    #[serde(default)]
    pub mobile: bool,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub state: ViewState,
    /// DOM `KeyboardEvent.key` value
    pub key: String,
    #[serde(default)]
    pub mobile: bool,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub state: ViewState,
    pub command: ViewCommand,
}

/// POST /state/transition - Apply one transition to the client's state
pub async fn apply_transition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<TransitionRequest>,
) -> Result<(HeaderMap, Json<TransitionResponse>)> {
    tracing::info!(transition = ?request.transition, "Transition request");

    let mode = DeviceMode::from_mobile_flag(request.mobile);
    let store = ViewStore::with_state(request.state, cookie_store(&state, &headers));
    let mut controller =
        TrekController::new(&state.dataset, store, mode, state.config.animation_duration_ms);

    let command = controller.request(request.transition);
    respond(controller, command)
}

/// POST /state/key - Apply a keyboard shortcut to the client's state
pub async fn handle_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<KeyRequest>,
) -> Result<(HeaderMap, Json<TransitionResponse>)> {
    let key = KeyInput::from_key_name(&request.key)
        .ok_or_else(|| AppError::InvalidRequest(format!("Unsupported key: '{}'", request.key)))?;
    tracing::info!(?key, "Key request");

    let mode = DeviceMode::from_mobile_flag(request.mobile);
    let store = ViewStore::with_state(request.state, cookie_store(&state, &headers));
    let mut controller =
        TrekController::new(&state.dataset, store, mode, state.config.animation_duration_ms);

    let command = controller.handle_key(key);
    respond(controller, command)
}

fn cookie_store(state: &AppState, headers: &HeaderMap) -> CookieStore {
    let header = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    CookieStore::from_header(header, state.config.preference_cookie_max_age_days)
}

fn respond(
    controller: TrekController<'_, CookieStore>,
    command: ViewCommand,
) -> Result<(HeaderMap, Json<TransitionResponse>)> {
    let next = controller.state().clone();
    let cookies = controller.into_store().into_preferences();

    let mut headers = HeaderMap::new();
    for cookie in cookies.set_cookie_headers() {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| AppError::Internal(format!("Invalid Set-Cookie value: {}", e)))?;
        headers.append(header::SET_COOKIE, value);
    }

    Ok((
        headers,
        Json(TransitionResponse {
            state: next,
            command,
        }),
    ))
}
