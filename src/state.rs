//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed config and the live stream counters. Streams share no
//! other state: each session owns its simulator.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::config::Config;
use crate::services::simulator::Simulator;

/// Shared application state. Clone is required by Axum; all fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    active_sessions: Arc<AtomicUsize>,
    /// Sessions ever opened; offsets the base seed so streams differ.
    opened_sessions: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            active_sessions: Arc::new(AtomicUsize::new(0)),
            opened_sessions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of streams currently open.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::Relaxed)
    }

    /// Register a new stream. The session stays counted until the guard drops.
    #[must_use]
    pub fn open_session(&self) -> SessionGuard {
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
        let ordinal = self.opened_sessions.fetch_add(1, Ordering::Relaxed);
        let simulator = match self.config.seed {
            Some(seed) => Simulator::seeded(seed.wrapping_add(ordinal)),
            None => Simulator::from_entropy(),
        };
        SessionGuard { active: self.active_sessions.clone(), simulator }
    }
}

/// Live stream registration plus the stream's reading generator.
pub struct SessionGuard {
    active: Arc<AtomicUsize>,
    pub simulator: Simulator,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
