//! Dashboard — Axum web server for the tracker.
//!
//! Serves a REST API and a self-contained HTML page. This is the whole
//! external surface of the system: reads expose the computed reports and
//! balance, writes expose the session operations (spin, undo, clear,
//! toggle, stake, capital). CORS enabled for local development.

pub mod routes;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::AppState;

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Start the dashboard web server.
///
/// This spawns a background task — it doesn't block.
pub fn spawn_dashboard(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);

    tokio::spawn(async move {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        info!(port, "Dashboard server starting on http://localhost:{port}");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind dashboard port");

        axum::serve(listener, app)
            .await
            .expect("Dashboard server error");
    });

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Read API
        .route("/api/status", get(routes::get_status))
        .route("/api/chances", get(routes::get_chances))
        .route("/api/spins", get(routes::get_spins).post(routes::post_spin))
        .route("/health", get(routes::health))
        // Session operations
        .route("/api/undo", post(routes::post_undo))
        .route("/api/clear", post(routes::post_clear))
        .route("/api/chances/:chance/toggle", post(routes::post_toggle))
        .route("/api/stake", put(routes::put_stake))
        .route("/api/capital", put(routes::put_capital))
        // Dashboard HTML
        .route("/", get(serve_dashboard))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML dashboard.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
