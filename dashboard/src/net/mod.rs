//! Networking for the reading stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! `stream_client` manages the websocket lifecycle and `session_events`
//! interprets raw browser socket input for it; the wire schema lives in
//! the shared `readings` crate.

pub mod session_events;
pub mod stream_client;
