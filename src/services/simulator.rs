//! Synthetic EEG reading generator.
//!
//! DESIGN
//! ======
//! Each window is one second of raw signal: a sine per rhythm with random
//! frequency, amplitude and phase, plus uniform noise. Band powers come from
//! running that window through [`dsp::extract_features`], and the emotion
//! label is derived from them with a fixed beta/alpha threshold.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use readings::{Features, Reading, Timestamp};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::dsp::{self, SAMPLE_RATE_HZ, SignalError, WINDOW_SAMPLES};

/// Beta/alpha ratio above which a reading is labelled anxious.
pub const ANXIETY_RATIO: f64 = 1.2;

pub const ANXIOUS: &str = "anxious";
pub const CALM: &str = "calm";

/// Peak amplitude of the uniform noise added to every sample.
pub const NOISE_AMPLITUDE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rhythm {
    pub name: &'static str,
    pub freq_hz: (f64, f64),
    pub amplitude: (f64, f64),
}

/// Sine sources mixed into each window, one per reported band.
pub const RHYTHMS: [Rhythm; 4] = [
    Rhythm { name: "delta", freq_hz: (1.0, 3.5), amplitude: (0.5, 2.0) },
    Rhythm { name: "theta", freq_hz: (4.5, 7.5), amplitude: (0.5, 1.5) },
    Rhythm { name: "alpha", freq_hz: (8.5, 12.5), amplitude: (0.5, 1.5) },
    Rhythm { name: "beta", freq_hz: (14.0, 28.0), amplitude: (0.8, 3.0) },
];

#[derive(Debug)]
pub struct Simulator {
    rng: StdRng,
}

impl Simulator {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// One window of raw samples at [`SAMPLE_RATE_HZ`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_window(&mut self) -> Vec<f64> {
        let rng = &mut self.rng;
        let sources: Vec<(f64, f64, f64)> = RHYTHMS
            .iter()
            .map(|r| {
                let freq = rng.random_range(r.freq_hz.0..=r.freq_hz.1);
                let amplitude = rng.random_range(r.amplitude.0..=r.amplitude.1);
                (freq, amplitude, rng.random_range(0.0..TAU))
            })
            .collect();

        (0..WINDOW_SAMPLES)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE_HZ;
                let signal: f64 = sources.iter().map(|(freq, amp, phase)| amp * (TAU * freq * t + phase).sin()).sum();
                signal + rng.random_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE)
            })
            .collect()
    }

    /// Band powers of a fresh window, in [`dsp::BANDS`] order.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors; a full window never produces one.
    pub fn sample_features(&mut self) -> Result<Features, SignalError> {
        dsp::extract_features(&self.sample_window())
    }

    /// Draw a full reading stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// See [`Simulator::sample_features`].
    pub fn next_reading(&mut self, timestamp: Timestamp) -> Result<Reading, SignalError> {
        let features = self.sample_features()?;
        Ok(Reading::new(timestamp, classify(&features), features))
    }
}

/// Label a feature set by its beta/alpha ratio. Missing bands read as calm.
#[must_use]
pub fn classify(features: &Features) -> &'static str {
    match (features.get("alpha_power"), features.get("beta_power")) {
        (Some(alpha), Some(beta)) if beta > ANXIETY_RATIO * alpha && beta > 0.0 => ANXIOUS,
        _ => CALM,
    }
}

/// Current UTC time as RFC 3339 text, or epoch millis if formatting fails.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn now_timestamp() -> Timestamp {
    let now = OffsetDateTime::now_utc();
    match now.format(&Rfc3339) {
        Ok(text) => Timestamp::Text(text),
        Err(e) => {
            tracing::warn!(error = %e, "rfc3339 formatting failed, using epoch millis");
            Timestamp::Millis((now.unix_timestamp_nanos() / 1_000_000) as f64)
        }
    }
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod tests;
