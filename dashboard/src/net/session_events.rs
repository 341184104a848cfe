//! Browser socket input → stream lifecycle steps.
//!
//! `BrowserSession` converts every gloo-net message or error into a
//! [`SocketInput`] and lets [`step`] decide what it means. Whether the
//! handshake completed decides how errors and closes are read: before open,
//! errors are the browser's handshake noise and a close is an open failure.

#[cfg(test)]
#[path = "session_events_test.rs"]
mod session_events_test;

use super::stream_client::{SocketEvent, StreamError};

/// One item from the browser socket, stripped of gloo-net types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketInput {
    Text(String),
    Bytes(usize),
    /// Any socket error other than a close.
    Error(String),
    Close { code: u16, reason: String, was_clean: bool },
}

/// What the session does with one [`SocketInput`].
#[derive(Debug)]
pub enum SessionStep {
    Event(SocketEvent),
    Ignore,
    /// The connection is over; this is the session's result.
    End(Result<String, StreamError>),
}

/// Map one socket input given whether the handshake completed.
pub fn step(endpoint: &str, opened: bool, input: SocketInput) -> SessionStep {
    match (opened, input) {
        (true, SocketInput::Text(text)) => SessionStep::Event(SocketEvent::Text(text)),
        (true, SocketInput::Bytes(len)) => SessionStep::Event(SocketEvent::Binary(len)),
        (true, SocketInput::Error(message)) => SessionStep::Event(SocketEvent::Error(message)),
        (true, SocketInput::Close { code, reason, was_clean }) => {
            SessionStep::End(Ok(close_reason(code, &reason, was_clean)))
        }
        (false, SocketInput::Close { code, reason, was_clean }) => SessionStep::End(Err(StreamError::Open {
            endpoint: endpoint.to_owned(),
            reason: close_reason(code, &reason, was_clean),
        })),
        (false, SocketInput::Text(_) | SocketInput::Bytes(_) | SocketInput::Error(_)) => SessionStep::Ignore,
    }
}

/// Result when the socket stream ends without a close frame.
pub fn stream_ended(endpoint: &str, opened: bool) -> Result<String, StreamError> {
    if opened {
        Ok("stream ended".to_owned())
    } else {
        Err(StreamError::Open { endpoint: endpoint.to_owned(), reason: "closed before handshake".to_owned() })
    }
}

/// Human-readable close description used in logs and `ClientEvent::Closed`.
pub fn close_reason(code: u16, reason: &str, was_clean: bool) -> String {
    format!("code={code} reason={reason:?} clean={was_clean}")
}
