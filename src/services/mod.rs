//! Service layer. Pure reading generation, no transport concerns.

pub mod dsp;
pub mod simulator;
