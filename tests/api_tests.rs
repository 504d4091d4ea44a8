use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{body_json, get, post_json, setup_test_app};

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = setup_test_app();

    let response = app.oneshot(get("/debug/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["checks"]["days"], 21);
    assert_eq!(json["checks"]["markers"], 21);
    assert_eq!(json["checks"]["bounds_table"], "ok");
}

#[tokio::test]
async fn test_list_days() {
    let app = setup_test_app();

    let response = app.oneshot(get("/days")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 21);
    let days = json["days"].as_array().unwrap();
    // Numeric order, not lexicographic
    assert_eq!(days[0]["day"], "0");
    assert_eq!(days[2]["day"], "2");
    assert_eq!(days[10]["day"], "10");
    assert_eq!(days[0]["marker_count"], 21);
    assert_eq!(days[3]["is_point_day"], true);
    assert_eq!(days[1]["name"], "Lukla to Phakding");
}

#[tokio::test]
async fn test_get_day_returns_feature_collection() {
    let app = setup_test_app();

    let response = app.oneshot(get("/days/12")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["is_point_day"], false);
    assert_eq!(json["geojson"]["type"], "FeatureCollection");
    assert_eq!(
        json["geojson"]["features"][0]["geometry"]["type"],
        "MultiLineString"
    );
    assert_eq!(json["properties"]["peak_alt"], "17,598");
}

#[tokio::test]
async fn test_unknown_day_is_not_found() {
    let app = setup_test_app();

    for uri in ["/days/21", "/days/abc/bounds", "/days/07/segments", "/markers?day=99"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not Found");
    }
}

#[tokio::test]
async fn test_day_bounds_uses_precomputed_table() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/days/1/bounds")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["mode"], "desktop");
    assert_eq!(json["source"], "precomputed");
    assert_eq!(json["bounds"], json!([[27.68167, 86.7116], [27.74563, 86.7332]]));

    let response = app
        .oneshot(get("/days/1/bounds?mode=mobile"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["mode"], "mobile");
    assert_eq!(json["bounds"], json!([[27.673675, 86.7089], [27.753625, 86.7359]]));
}

#[tokio::test]
async fn test_point_day_has_no_bounds() {
    let app = setup_test_app();

    let response = app.oneshot(get("/days/3/bounds")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["bounds"].is_null());
    assert!(json["source"].is_null());
}

#[tokio::test]
async fn test_invalid_mode_is_rejected() {
    let app = setup_test_app();

    let response = app
        .oneshot(get("/days/1/bounds?mode=tablet"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_day_segments() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/days/1/segments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let segments = json["segments"].as_array().unwrap();
    assert!(!segments.is_empty());
    assert_eq!(json["count"], segments.len());
    assert!(segments[0]["color"].as_str().unwrap().starts_with('#'));
    // Consecutive segments share an endpoint
    assert_eq!(segments[0]["end"], segments[1]["start"]);

    let response = app.oneshot(get("/days/3/segments")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_day_profile() {
    let app = setup_test_app();

    let response = app.oneshot(get("/days/12/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let points = json["points"].as_array().unwrap();
    assert!(points.len() > 2);
    assert_eq!(points[0]["distance_km"], 0.0);
    assert!(json["max_elevation_m"].as_f64().unwrap() > 5000.0);
}

#[tokio::test]
async fn test_day_dashboard_in_both_units() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/days/1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["unit"], "km");
    assert_eq!(json["distance"], "7.7 km");
    assert_eq!(json["ascent"], "↑ 152 m");
    assert_eq!(json["descent"], "↓ 248 m");

    let response = app
        .oneshot(get("/days/1/dashboard?unit=ft"))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["distance"], "4.8 mi");
    assert_eq!(json["start_altitude"], "9,383 ft");
    assert_eq!(json["ascent"], "↑ 500 ft");
}

#[tokio::test]
async fn test_navigation_wraps_around() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/days/20/next")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["from"], "20");
    assert_eq!(json["day"], "0");
    assert_eq!(json["metrics"]["day"], "0");

    let response = app.clone().oneshot(get("/days/0/previous")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["day"], "20");
    assert_eq!(json["properties"]["name"], "Monjo to Lukla");

    // An unknown current day restarts from the first day
    let response = app.oneshot(get("/days/99/next")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["day"], "1");
}

#[tokio::test]
async fn test_markers_label_collisions() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/markers?day=12")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 3);

    let markers = json["markers"].as_array().unwrap();
    let label = |id: &str| {
        markers
            .iter()
            .find(|m| m["id"] == id)
            .map(|m| m["show_label"].as_bool().unwrap())
    };
    assert_eq!(label("ebc"), Some(true));
    assert_eq!(label("gorak-shep"), Some(false));
    assert_eq!(label("lobuche"), Some(true));

    let ebc = markers.iter().find(|m| m["id"] == "ebc").unwrap();
    assert_eq!(ebc["icon_size"], 36);
    assert_eq!(ebc["category"], "base-camp");

    // Overview lists every marker
    let response = app.oneshot(get("/markers")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["day"], "0");
    assert_eq!(json["count"], 21);
}

#[tokio::test]
async fn test_initial_state_uses_device_defaults() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/state")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["mode"], "desktop");
    assert_eq!(json["state"]["day"], "1");
    assert_eq!(json["state"]["single_day"], false);
    assert_eq!(json["state"]["unit"], "km");
    assert_eq!(json["state"]["legend_visible"], true);

    let response = app.oneshot(get("/state?mobile=true")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["mode"], "mobile");
    assert_eq!(json["state"]["legend_visible"], false);
}

#[tokio::test]
async fn test_initial_state_restores_cookies() {
    let app = setup_test_app();

    let request = axum::http::Request::builder()
        .uri("/state?mobile=true")
        .header("cookie", "unit=ft; legend=true")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["state"]["unit"], "ft");
    assert_eq!(json["state"]["legend_visible"], true);
}

async fn initial_state(app: &axum::Router) -> serde_json::Value {
    let response = app.clone().oneshot(get("/state")).await.unwrap();
    body_json(response).await["state"].clone()
}

#[tokio::test]
async fn test_toggle_unit_sets_cookie() {
    let app = setup_test_app();
    let state = initial_state(&app).await;

    let request = post_json(
        "/state/transition",
        json!({"state": state, "transition": {"type": "toggle_unit"}}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("unit=ft;"));
    assert!(cookies[0].contains("Max-Age=31536000"));

    let json = body_json(response).await;
    assert_eq!(json["state"]["unit"], "ft");
    assert_eq!(json["command"]["type"], "keep_viewport");
}

#[tokio::test]
async fn test_info_toggle_sets_no_cookie() {
    let app = setup_test_app();
    let state = initial_state(&app).await;

    let request = post_json(
        "/state/transition",
        json!({"state": state, "transition": {"type": "toggle_info"}}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["state"]["info_visible"], true);
}

#[tokio::test]
async fn test_single_day_view_fits_bounds() {
    let app = setup_test_app();
    let state = initial_state(&app).await;

    let request = post_json(
        "/state/transition",
        json!({"state": state, "transition": {"type": "set_single_day_view", "enabled": true}}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["state"]["single_day"], true);
    assert_eq!(json["command"]["type"], "fit_bounds");
    assert_eq!(
        json["command"]["bounds"],
        json!([[27.68167, 86.7116], [27.74563, 86.7332]])
    );
    assert_eq!(json["command"]["duration_ms"], 1000);
}

#[tokio::test]
async fn test_arrow_key_wraps_to_overview() {
    let app = setup_test_app();
    let mut state = initial_state(&app).await;
    state["day"] = json!("20");
    state["single_day"] = json!(true);

    let request = post_json(
        "/state/key",
        json!({"state": state, "key": "ArrowRight"}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"]["day"], "0");
    // The overview day is not a single-day view
    assert_eq!(json["state"]["single_day"], false);
    assert_eq!(json["command"]["type"], "fly_to");
    assert_eq!(json["command"]["zoom"], 11.0);
    assert_eq!(json["command"]["center"], json!({"lat": 27.87, "lng": 86.77}));
}

#[tokio::test]
async fn test_escape_returns_to_overview() {
    let app = setup_test_app();
    let mut state = initial_state(&app).await;
    state["day"] = json!("7");
    state["single_day"] = json!(true);

    let request = post_json("/state/key", json!({"state": state, "key": "Escape"}), None);
    let response = app.oneshot(request).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["state"]["single_day"], false);
    assert_eq!(json["state"]["day"], "7");
    assert_eq!(json["command"]["type"], "fly_to");
    assert_eq!(json["command"]["zoom"], 11.0);
}

#[tokio::test]
async fn test_legend_key_persists_preference() {
    let app = setup_test_app();
    let state = initial_state(&app).await;

    let request = post_json(
        "/state/key",
        json!({"state": state, "key": "L", "mobile": true}),
        Some("legend=true"),
    );
    let response = app.oneshot(request).await.unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("legend=false;"));

    let json = body_json(response).await;
    assert_eq!(json["state"]["legend_visible"], false);
}

#[tokio::test]
async fn test_unsupported_key_is_rejected() {
    let app = setup_test_app();
    let state = initial_state(&app).await;

    let request = post_json("/state/key", json!({"state": state, "key": "PageDown"}), None);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
