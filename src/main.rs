use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use trekmap::config::Config;
use trekmap::dataset::TrekDataset;
use trekmap::services::validation::check_bounds_table;
use trekmap::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trekmap=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting trek map server");
    tracing::info!("Configuration loaded successfully");

    // Load the embedded itinerary
    let dataset = TrekDataset::embedded()?;
    tracing::info!(
        days = dataset.len(),
        markers = dataset.markers().len(),
        "Trek dataset loaded"
    );

    let issues = check_bounds_table(&dataset);
    if !issues.is_empty() {
        tracing::warn!(
            issues = issues.len(),
            "Bounds table is out of date; affected days fall back to the route geometry. \
             Regenerate it with `cargo run --bin bounds_table -- --output=data/bounds.json`"
        );
    }

    let static_dir = config.static_dir.clone();
    let addr = config.server_address();

    // Create application state
    let state = Arc::new(AppState::new(dataset, config));

    // Build router with CORS and tracing
    let mut app = Router::new().nest("/api/v1", trekmap::routes::create_router(state));

    if let Some(dir) = static_dir {
        tracing::info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
