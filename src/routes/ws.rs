//! WebSocket handler: one reading per interval until the peer leaves.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register session, seed its simulator
//! 2. Every tick → send one `Reading` as a JSON text frame
//! 3. Inbound text → logged and ignored (clients may send keepalives)
//! 4. Close, socket error, or failed send → drop the session

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::simulator::now_timestamp;
use crate::state::AppState;

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    let mut session = state.open_session();

    let mut ticker = tokio::time::interval(state.config.stream_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(%session_id, sessions = state.active_sessions(), "ws: client connected");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let text = match session.simulator.next_reading(now_timestamp()).and_then(|r| Ok(readings::encode_reading(&r)?)) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%session_id, error = %e, "ws: failed to build reading");
                        continue;
                    }
                };
                if let Err(e) = socket.send(Message::Text(text.into())).await {
                    debug!(%session_id, error = %e, "ws: send failed");
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!(%session_id, len = text.len(), "ws: ignoring inbound text");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(%session_id, error = %e, "ws: receive failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    drop(session);
    info!(%session_id, sessions = state.active_sessions(), "ws: client disconnected");
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
