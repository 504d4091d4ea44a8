use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;
use trekmap::config::Config;
use trekmap::dataset::TrekDataset;
use trekmap::AppState;

/// Router over the embedded dataset with default configuration
#[allow(dead_code)]
pub fn setup_test_app() -> axum::Router {
    let dataset = TrekDataset::embedded().expect("Embedded dataset should load");
    let state = Arc::new(AppState::new(dataset, get_test_config()));
    trekmap::routes::create_router(state)
}

/// Get test configuration
#[allow(dead_code)]
pub fn get_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        preference_cookie_max_age_days: 365,
        segment_cache_max_entries: 16,
        animation_duration_ms: 1000,
        static_dir: None,
    }
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
