use super::*;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

const VALID: &str = r#"{"timestamp":1000,"emotion":"anxious","features":{"alpha":3,"beta":5}}"#;

/// One scripted connection: events to emit, then how it ends.
/// `end: None` keeps the connection open forever.
struct Scripted {
    events: Vec<SocketEvent>,
    end: Option<Result<String, StreamError>>,
}

fn closes_after(events: Vec<SocketEvent>) -> Scripted {
    Scripted { events, end: Some(Ok("closed by peer".to_owned())) }
}

fn stays_open(events: Vec<SocketEvent>) -> Scripted {
    Scripted { events, end: None }
}

/// Virtual clock shared by the fake session and timer, in milliseconds.
type Clock = Rc<Cell<u64>>;

struct FakeSession {
    clock: Clock,
    script: VecDeque<Scripted>,
    attempts: Rc<RefCell<Vec<(u64, String)>>>,
}

impl Session for FakeSession {
    async fn run(&mut self, endpoint: &str, on_event: &mut dyn FnMut(SocketEvent)) -> Result<String, StreamError> {
        self.attempts.borrow_mut().push((self.clock.get(), endpoint.to_owned()));
        let Some(conn) = self.script.pop_front() else {
            return futures::future::pending().await;
        };
        for event in conn.events {
            on_event(event);
        }
        match conn.end {
            Some(end) => end,
            None => futures::future::pending().await,
        }
    }
}

struct FakeTimer {
    clock: Clock,
    sleeps: Rc<RefCell<Vec<Duration>>>,
    /// Number of delays that elapse; later delays never fire.
    budget: usize,
}

impl Timer for FakeTimer {
    async fn sleep(&mut self, delay: Duration) {
        self.sleeps.borrow_mut().push(delay);
        if self.budget == 0 {
            futures::future::pending::<()>().await;
        }
        self.budget -= 1;
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.clock.set(self.clock.get() + ms);
    }
}

struct Harness {
    pool: LocalPool,
    client: StreamClient,
    attempts: Rc<RefCell<Vec<(u64, String)>>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
    events: Rc<RefCell<Vec<ClientEvent>>>,
    finished: Rc<Cell<bool>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            client: StreamClient::default(),
            attempts: Rc::default(),
            sleeps: Rc::default(),
            events: Rc::default(),
            finished: Rc::default(),
        }
    }

    fn connect(&mut self, script: Vec<Scripted>, timer_budget: usize) -> bool {
        let clock = Clock::default();
        let session = FakeSession { clock: clock.clone(), script: script.into(), attempts: self.attempts.clone() };
        let timer = FakeTimer { clock, sleeps: self.sleeps.clone(), budget: timer_budget };
        let events = self.events.clone();
        let finished = self.finished.clone();
        let spawner = self.pool.spawner();
        self.client.connect(
            session,
            timer,
            move |event| events.borrow_mut().push(event),
            move |task| {
                spawner
                    .spawn_local(async move {
                        task.await;
                        finished.set(true);
                    })
                    .expect("spawn");
            },
        )
    }

    fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    fn attempt_times(&self) -> Vec<u64> {
        self.attempts.borrow().iter().map(|(t, _)| *t).collect()
    }
}

// =============================================================
// StreamConfig
// =============================================================

#[test]
fn default_config_uses_fixed_endpoint_and_delay() {
    let config = StreamConfig::default();
    assert_eq!(config.endpoint, "ws://localhost:8000/ws/eeg_data");
    assert_eq!(config.reconnect_delay, Duration::from_millis(5000));
}

#[test]
fn with_endpoint_overrides_only_endpoint() {
    let config = StreamConfig::default().with_endpoint("ws://example.test/ws");
    assert_eq!(config.endpoint, "ws://example.test/ws");
    assert_eq!(config.reconnect_delay, Duration::from_millis(RECONNECT_DELAY_MS));
}

// =============================================================
// Reconnect policy
// =============================================================

#[test]
fn each_close_schedules_one_attempt_after_fixed_delay() {
    let mut h = Harness::new();
    let script = vec![
        closes_after(vec![SocketEvent::Opened]),
        closes_after(vec![SocketEvent::Opened]),
        closes_after(vec![SocketEvent::Opened]),
    ];
    assert!(h.connect(script, usize::MAX));
    h.run();

    assert_eq!(h.attempt_times(), vec![0, 5000, 10_000, 15_000]);
    assert_eq!(*h.sleeps.borrow(), vec![Duration::from_millis(5000); 3]);
    assert!(h.attempts.borrow().iter().all(|(_, url)| url == DEFAULT_ENDPOINT));
}

#[test]
fn no_attempt_before_delay_elapses() {
    let mut h = Harness::new();
    h.connect(vec![closes_after(vec![SocketEvent::Opened])], 0);
    h.run();

    assert_eq!(h.attempt_times(), vec![0]);
    assert_eq!(h.sleeps.borrow().len(), 1);
    let events = h.events.borrow();
    assert!(matches!(events.last(), Some(ClientEvent::ReconnectScheduled { delay }) if *delay == Duration::from_millis(5000)));
}

#[test]
fn open_failure_is_treated_as_close() {
    let mut h = Harness::new();
    let failed = Scripted {
        events: Vec::new(),
        end: Some(Err(StreamError::Open { endpoint: DEFAULT_ENDPOINT.to_owned(), reason: "refused".to_owned() })),
    };
    h.connect(vec![failed], 1);
    h.run();

    assert_eq!(h.attempt_times(), vec![0, 5000]);
    let events = h.events.borrow();
    assert!(events.iter().any(|e| matches!(e, ClientEvent::Closed { reason } if reason.contains("refused"))));
    assert!(!events.iter().any(|e| matches!(e, ClientEvent::Connected)));
}

#[test]
fn failed_handshake_never_reports_connected() {
    let mut h = Harness::new();
    let refused = Scripted {
        events: vec![SocketEvent::Error("connection refused".to_owned())],
        end: Some(Err(StreamError::Open {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            reason: "code=1006 reason=\"\" clean=false".to_owned(),
        })),
    };
    h.connect(vec![refused], 0);
    h.run();

    let mut state = crate::state::dashboard::DashboardState::default();
    let mut saw_connected = false;
    for event in h.events.borrow_mut().drain(..) {
        saw_connected |= matches!(event, ClientEvent::Connected);
        state.apply(event);
        assert_ne!(state.connection_status, crate::state::dashboard::ConnectionStatus::Connected);
    }
    assert!(!saw_connected);
    assert_eq!(state.connection_status, crate::state::dashboard::ConnectionStatus::ReconnectPending);
}

#[test]
fn transport_error_without_close_does_not_reconnect() {
    let mut h = Harness::new();
    h.connect(vec![stays_open(vec![SocketEvent::Opened, SocketEvent::Error("network blip".to_owned())])], usize::MAX);
    h.run();

    assert_eq!(h.attempt_times(), vec![0]);
    assert!(h.sleeps.borrow().is_empty());
    let events = h.events.borrow();
    assert!(events.iter().any(|e| matches!(e, ClientEvent::TransportError(m) if m == "network blip")));
    assert!(!events.iter().any(|e| matches!(e, ClientEvent::Closed { .. })));
}

#[test]
fn lifecycle_events_follow_connection_order() {
    let mut h = Harness::new();
    h.connect(vec![closes_after(vec![SocketEvent::Opened])], 1);
    h.run();

    let kinds: Vec<&'static str> = h
        .events
        .borrow()
        .iter()
        .map(|e| match e {
            ClientEvent::Connecting { .. } => "connecting",
            ClientEvent::Connected => "connected",
            ClientEvent::Closed { .. } => "closed",
            ClientEvent::ReconnectScheduled { .. } => "scheduled",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["connecting", "connected", "closed", "scheduled", "connecting"]);
    assert!(matches!(h.events.borrow().last(), Some(ClientEvent::Connecting { attempt: 2 })));
}

// =============================================================
// Message handling
// =============================================================

#[test]
fn valid_messages_are_forwarded_and_malformed_are_rejected() {
    let mut h = Harness::new();
    h.connect(
        vec![stays_open(vec![
            SocketEvent::Opened,
            SocketEvent::Text("not json".to_owned()),
            SocketEvent::Binary(16),
            SocketEvent::Text(VALID.to_owned()),
        ])],
        0,
    );
    h.run();

    let events = h.events.borrow();
    let rejected = events.iter().filter(|e| matches!(e, ClientEvent::Rejected(_))).count();
    let readings: Vec<&Reading> = events
        .iter()
        .filter_map(|e| match e {
            ClientEvent::Reading(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, 1);
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].emotion, "anxious");
    assert_eq!(h.attempt_times(), vec![0]);
}

// =============================================================
// connect / shutdown
// =============================================================

#[test]
fn connect_is_noop_while_running() {
    let mut h = Harness::new();
    assert!(h.connect(vec![stays_open(vec![SocketEvent::Opened])], 0));
    assert!(!h.connect(vec![stays_open(vec![SocketEvent::Opened])], 0));
    h.run();
    assert_eq!(h.attempt_times(), vec![0]);
    assert!(h.client.is_running());
}

#[test]
fn shutdown_cancels_pending_reconnect() {
    let mut h = Harness::new();
    h.connect(vec![closes_after(vec![SocketEvent::Opened])], 0);
    h.run();
    assert_eq!(h.sleeps.borrow().len(), 1);
    assert!(!h.finished.get());

    assert!(h.client.shutdown());
    h.run();

    assert!(h.finished.get());
    assert!(!h.client.is_running());
    assert_eq!(h.attempt_times(), vec![0]);
}

#[test]
fn shutdown_without_task_returns_false() {
    let mut client = StreamClient::default();
    assert!(!client.shutdown());
}

#[test]
fn connect_after_shutdown_starts_fresh_task() {
    let mut h = Harness::new();
    h.connect(vec![stays_open(vec![SocketEvent::Opened])], 0);
    h.run();
    h.client.shutdown();
    h.run();

    assert!(h.connect(vec![stays_open(vec![SocketEvent::Opened])], 0));
    h.run();
    assert_eq!(h.attempts.borrow().len(), 2);
    let connecting: Vec<u64> = h
        .events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            ClientEvent::Connecting { attempt } => Some(*attempt),
            _ => None,
        })
        .collect();
    assert_eq!(connecting, vec![1, 1]);
}
