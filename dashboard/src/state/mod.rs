//! Client-side dashboard state.
//!
//! DESIGN
//! ======
//! `dashboard` holds everything the page renders and is the only thing the
//! connection task writes; `history` is the bounded buffer behind the trend
//! chart.

pub mod dashboard;
pub mod history;
