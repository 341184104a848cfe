//! Liveness and stream status endpoints.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::services::simulator::now_timestamp;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: String,
    /// Open `/ws/eeg_data` streams.
    pub sessions: usize,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_owned(),
        timestamp: now_timestamp().to_string(),
        sessions: state.active_sessions(),
    })
}
