//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the reading stream, a status endpoint, and the built
//! dashboard. Any path not matched by a route falls through to the static
//! files, with `index.html` as the final fallback.

pub mod status;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let dashboard_dir = &state.config.dashboard_dir;
    let dashboard = ServeDir::new(dashboard_dir).fallback(ServeFile::new(dashboard_dir.join("index.html")));

    Router::new()
        .route("/ws/eeg_data", get(ws::handle_ws))
        .route("/api/status", get(status::status))
        .route("/healthz", get(healthz))
        .fallback_service(dashboard)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
pub(crate) mod mod_test;
