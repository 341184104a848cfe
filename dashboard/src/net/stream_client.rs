//! WebSocket stream client: connect, pump readings, reconnect on close.
//!
//! The `StreamClient` owns the single connection task. The task opens the
//! endpoint, parses every text message into a [`Reading`], and after each
//! close waits a fixed delay before connecting again. No backoff, no jitter,
//! no attempt cap.
//!
//! DESIGN
//! ======
//! The loop is written against two small seams, [`Session`] (one connection
//! from open to close) and [`Timer`] (the reconnect delay), so it runs the
//! same under the browser event loop and under a native test executor. The
//! browser implementations are gated behind `#[cfg(feature = "csr")]`.
//!
//! The task is wrapped in an `Abortable`; the abort handle stored on the
//! client is the only way to cancel it, which also cancels a pending
//! reconnect delay and drops the live socket.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors are logged and reported but never trigger a reconnect on
//! their own; only a close does. Malformed messages are logged, reported, and
//! dropped without touching the connection.

#[cfg(test)]
#[path = "stream_client_test.rs"]
mod stream_client_test;

use std::time::Duration;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use readings::{Reading, ReadingError, parse_reading};

/// Fixed endpoint of the reading stream.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/ws/eeg_data";

/// Delay between a close and the next connection attempt.
pub const RECONNECT_DELAY_MS: u64 = 5000;

/// Error ending a single connection attempt.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The socket could not be created for the endpoint.
    #[error("failed to open {endpoint}: {reason}")]
    Open { endpoint: String, reason: String },
}

/// Where to connect and how long to wait between attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    pub endpoint: String,
    pub reconnect_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_owned(), reconnect_delay: Duration::from_millis(RECONNECT_DELAY_MS) }
    }
}

impl StreamConfig {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Raw lifecycle event from one open socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Text(String),
    /// Binary frame of the given length; the stream protocol is text-only.
    Binary(usize),
    Error(String),
}

/// Event delivered to the dashboard state by the connection task.
#[derive(Debug)]
pub enum ClientEvent {
    Connecting { attempt: u64 },
    Connected,
    Reading(Reading),
    Rejected(ReadingError),
    TransportError(String),
    Closed { reason: String },
    ReconnectScheduled { delay: Duration },
    Stopped,
}

/// One connection from open to close.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Open `endpoint` and report socket events until the connection closes.
    ///
    /// Resolves with a close description once the peer or the network ends
    /// the connection.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Open`] when no socket could be created; the
    /// caller treats that exactly like a close.
    async fn run(&mut self, endpoint: &str, on_event: &mut dyn FnMut(SocketEvent)) -> Result<String, StreamError>;
}

/// Source of the reconnect delay.
#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&mut self, delay: Duration);
}

/// Connection loop. Never returns; cancel it through [`StreamClient::shutdown`].
pub async fn run_stream<S, T, F>(mut session: S, mut timer: T, config: StreamConfig, mut sink: F)
where
    S: Session,
    T: Timer,
    F: FnMut(ClientEvent),
{
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        sink(ClientEvent::Connecting { attempt });

        let outcome = session
            .run(&config.endpoint, &mut |event: SocketEvent| handle_socket_event(event, &mut sink))
            .await;

        let reason = match outcome {
            Ok(reason) => {
                leptos::logging::log!("stream disconnected: {reason}");
                reason
            }
            Err(e) => {
                leptos::logging::warn!("stream error: {e}");
                e.to_string()
            }
        };
        sink(ClientEvent::Closed { reason });

        sink(ClientEvent::ReconnectScheduled { delay: config.reconnect_delay });
        timer.sleep(config.reconnect_delay).await;
    }
}

fn handle_socket_event<F: FnMut(ClientEvent)>(event: SocketEvent, sink: &mut F) {
    match event {
        SocketEvent::Opened => {
            leptos::logging::log!("stream connected");
            sink(ClientEvent::Connected);
        }
        SocketEvent::Text(text) => match parse_reading(&text) {
            Ok(reading) => sink(ClientEvent::Reading(reading)),
            Err(e) => {
                leptos::logging::warn!("dropping malformed reading: {e}");
                sink(ClientEvent::Rejected(e));
            }
        },
        SocketEvent::Binary(len) => {
            leptos::logging::log!("ignoring {len}-byte binary message");
        }
        SocketEvent::Error(message) => {
            leptos::logging::error!("stream transport error: {message}");
            sink(ClientEvent::TransportError(message));
        }
    }
}

/// Owner of the single connection task.
#[derive(Debug)]
pub struct StreamClient {
    config: StreamConfig,
    task: Option<AbortHandle>,
}

impl StreamClient {
    #[must_use]
    pub fn new(config: StreamConfig) -> Self {
        Self { config, task: None }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start the connection task on `spawn`.
    ///
    /// Returns `false` without spawning when a task is already running.
    pub fn connect<S, T, F>(
        &mut self,
        session: S,
        timer: T,
        sink: F,
        spawn: impl FnOnce(LocalBoxFuture<'static, ()>),
    ) -> bool
    where
        S: Session + 'static,
        T: Timer + 'static,
        F: FnMut(ClientEvent) + 'static,
    {
        if self.is_running() {
            return false;
        }

        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(run_stream(session, timer, self.config.clone(), sink), registration);
        spawn(Box::pin(async move {
            let _ = task.await;
        }));
        self.task = Some(handle);
        true
    }

    /// Cancel the connection task, its pending reconnect delay, and any live
    /// socket. Returns `false` if nothing was running.
    pub fn shutdown(&mut self) -> bool {
        match self.task.take() {
            Some(handle) => {
                handle.abort();
                leptos::logging::log!("stream shut down");
                true
            }
            None => false,
        }
    }
}

impl Default for StreamClient {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}

/// `gloo-net` WebSocket session.
#[cfg(feature = "csr")]
#[derive(Debug, Default)]
pub struct BrowserSession;

#[cfg(feature = "csr")]
impl Session for BrowserSession {
    async fn run(&mut self, endpoint: &str, on_event: &mut dyn FnMut(SocketEvent)) -> Result<String, StreamError> {
        use std::pin::Pin;

        use futures::{Sink, StreamExt};
        use gloo_net::websocket::futures::WebSocket;
        use gloo_net::websocket::{Message, State, WebSocketError};

        use super::session_events::{SessionStep, SocketInput, step, stream_ended};

        let mut ws = WebSocket::open(endpoint)
            .map_err(|e| StreamError::Open { endpoint: endpoint.to_owned(), reason: e.to_string() })?;

        // Pending while the socket is still CONNECTING.
        let _ = futures::future::poll_fn(|cx| Sink::<Message>::poll_ready(Pin::new(&mut ws), cx)).await;
        let opened = matches!(ws.state(), State::Open);
        if opened {
            on_event(SocketEvent::Opened);
        }

        while let Some(msg) = ws.next().await {
            let input = match msg {
                Ok(Message::Text(text)) => SocketInput::Text(text),
                Ok(Message::Bytes(bytes)) => SocketInput::Bytes(bytes.len()),
                Err(WebSocketError::ConnectionClose(close)) => {
                    SocketInput::Close { code: close.code, reason: close.reason, was_clean: close.was_clean }
                }
                Err(e) => SocketInput::Error(e.to_string()),
            };
            match step(endpoint, opened, input) {
                SessionStep::Event(event) => on_event(event),
                SessionStep::Ignore => {}
                SessionStep::End(end) => return end,
            }
        }

        stream_ended(endpoint, opened)
    }
}

/// `gloo-timers` reconnect delay.
#[cfg(feature = "csr")]
#[derive(Debug, Default)]
pub struct BrowserTimer;

#[cfg(feature = "csr")]
impl Timer for BrowserTimer {
    async fn sleep(&mut self, delay: Duration) {
        gloo_timers::future::sleep(delay).await;
    }
}

/// Start the browser connection task feeding `dashboard`.
#[cfg(feature = "csr")]
pub fn start_browser_stream(
    client: &mut StreamClient,
    dashboard: leptos::prelude::RwSignal<crate::state::dashboard::DashboardState>,
) -> bool {
    use leptos::prelude::Update;

    client.connect(
        BrowserSession,
        BrowserTimer,
        move |event| dashboard.update(|d| d.apply(event)),
        |task| leptos::task::spawn_local(task),
    )
}

/// Stop the browser connection task and mark the dashboard stopped.
#[cfg(feature = "csr")]
pub fn stop_browser_stream(
    client: &mut StreamClient,
    dashboard: leptos::prelude::RwSignal<crate::state::dashboard::DashboardState>,
) -> bool {
    use leptos::prelude::Update;

    let stopped = client.shutdown();
    if stopped {
        dashboard.update(|d| d.apply(ClientEvent::Stopped));
    }
    stopped
}
