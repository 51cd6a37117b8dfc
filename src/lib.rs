//! Game review statistics service.
//!
//! Downloads a CSV dataset of video-game reviews, caches the parsed records in
//! Redis, and serves a per-year release count over the 15 most common platforms
//! as an HTML table, an SVG bar chart, and JSON.
//!
//! # Endpoints
//! - `GET /` — statistics as an HTML table
//! - `GET /data/` — first 100 raw records as an HTML table
//! - `GET /image` — bar chart as inline SVG
//! - `GET /about` — static info page
//! - `GET /json-dataset` — full record list as a JSON array
//! - `GET /json-stats` — year-to-count mapping as a JSON object
//!
//! # Environment
//! - `GAMESTATS_PORT` (default 8080)
//! - `REDIS_URL` (default `redis://127.0.0.1:6379`)
//! - `DATASET_URL` (default the IGN games CSV)
//! - `FETCH_TIMEOUT_SECS` (default 200)
//! - `INJECT_ROW_ERROR` (test-only, forces a parse error on row 1)

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod html;
pub mod models;
pub mod routes;
pub mod state;
pub mod stats;

use routes::{
    about_handler, data_handler, home_handler, image_handler, json_dataset_handler,
    json_stats_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/data", get(data_handler))
        .route("/data/", get(data_handler))
        .route("/image", get(image_handler))
        .route("/about", get(about_handler))
        .route("/json-dataset", get(json_dataset_handler))
        .route("/json-stats", get(json_stats_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
