//! Utility helpers shared across dashboard modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers kept apart from components so they can be tested natively.

pub mod chart_geometry;
pub mod palette;
