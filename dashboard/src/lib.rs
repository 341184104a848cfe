//! # dashboard
//!
//! Leptos + WASM client for the EEG monitor. Opens the reading stream,
//! keeps a bounded history, and renders the emotion status, the band power
//! distribution, and the power trend.
//!
//! Browser-only code (websocket, timers, console logging) is gated behind
//! the `csr` feature; everything else builds and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod render;
pub mod state;
pub mod util;
