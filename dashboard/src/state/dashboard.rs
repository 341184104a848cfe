#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::stream_client::ClientEvent;
use crate::render::{self, Surfaces};
use crate::state::history::ReadingHistory;

/// Everything the dashboard page renders, owned by one reactive signal.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub connection_status: ConnectionStatus,
    /// Attempt number of the current (or most recent) connection.
    pub connect_attempts: u64,
    pub surfaces: Surfaces,
    pub history: ReadingHistory,
    pub readings_received: u64,
    pub rejected_messages: u64,
    pub transport_errors: u64,
    pub last_error: Option<String>,
}

/// Stream connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Closed; waiting out the fixed delay before the next attempt.
    ReconnectPending,
    /// Shut down explicitly; no further attempts.
    Stopped,
}

impl DashboardState {
    /// Fold one connection-task event into the state.
    pub fn apply(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Connecting { attempt } => {
                self.connection_status = ConnectionStatus::Connecting;
                self.connect_attempts = attempt;
            }
            ClientEvent::Connected => self.connection_status = ConnectionStatus::Connected,
            ClientEvent::Reading(reading) => {
                self.readings_received += 1;
                render::render(&mut self.surfaces, &mut self.history, &reading);
            }
            ClientEvent::Rejected(err) => {
                self.rejected_messages += 1;
                self.last_error = Some(err.to_string());
            }
            ClientEvent::TransportError(message) => {
                self.transport_errors += 1;
                self.last_error = Some(message);
            }
            ClientEvent::Closed { .. } => self.connection_status = ConnectionStatus::Disconnected,
            ClientEvent::ReconnectScheduled { .. } => self.connection_status = ConnectionStatus::ReconnectPending,
            ClientEvent::Stopped => self.connection_status = ConnectionStatus::Stopped,
        }
    }
}
