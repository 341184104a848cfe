//! EEG band-power extraction: raw samples in, per-band PSD means out.
//!
//! PIPELINE
//! ========
//! 1. Band-pass 4-30 Hz: order-5 Butterworth high-pass and low-pass
//!    cascaded as second-order sections, run forward then backward
//!    (zero phase) over an odd-reflected, steady-state-initialised signal.
//! 2. Normalise to zero mean and unit variance.
//! 3. Welch PSD: periodic Hann segments of up to 1024 samples, 50 %
//!    overlap, per-segment mean removal, one-sided density scaling.
//! 4. Band power: mean PSD over each band's bins, both edges inclusive.

use std::f64::consts::PI;

use readings::{Features, ReadingError};
use rustfft::{FftPlanner, num_complex::Complex};

pub const SAMPLE_RATE_HZ: f64 = 256.0;

/// One second of signal per reading.
pub const WINDOW_SAMPLES: usize = 256;

pub const PASSBAND_HZ: (f64, f64) = (4.0, 30.0);
pub const FILTER_ORDER: usize = 5;

/// Requested Welch segment length; clamped to the input length.
pub const WELCH_SEGMENT: usize = 1024;

/// Shortest input the filter and PSD accept.
pub const MIN_SAMPLES: usize = 64;

/// Standard deviation below which a signal counts as flat.
const FLAT_STD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub name: &'static str,
    pub low_hz: f64,
    pub high_hz: f64,
}

/// Reported bands, in wire order.
pub const BANDS: [Band; 4] = [
    Band { name: "delta_power", low_hz: 0.5, high_hz: 4.0 },
    Band { name: "theta_power", low_hz: 4.0, high_hz: 8.0 },
    Band { name: "alpha_power", low_hz: 8.0, high_hz: 13.0 },
    Band { name: "beta_power", low_hz: 13.0, high_hz: 30.0 },
];

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("signal has {len} samples, need at least {min}")]
    TooShort { len: usize, min: usize },
    #[error(transparent)]
    Reading(#[from] ReadingError),
}

// =============================================================================
// FILTER
// =============================================================================

/// Second-order IIR section, normalised so `a0 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Low,
    High,
}

impl Section {
    fn biquad(pass: Pass, cutoff_hz: f64, fs: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * cutoff_hz / fs;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * q);
        let a0 = 1.0 + alpha;
        let (b0, b1) = match pass {
            Pass::Low => ((1.0 - cos) / 2.0, 1.0 - cos),
            Pass::High => ((1.0 + cos) / 2.0, -(1.0 + cos)),
        };
        Self { b0: b0 / a0, b1: b1 / a0, b2: b0 / a0, a1: -2.0 * cos / a0, a2: (1.0 - alpha) / a0 }
    }

    fn first_order(pass: Pass, cutoff_hz: f64, fs: f64) -> Self {
        let k = (PI * cutoff_hz / fs).tan();
        let (b0, b1) = match pass {
            Pass::Low => (k / (1.0 + k), k / (1.0 + k)),
            Pass::High => (1.0 / (1.0 + k), -1.0 / (1.0 + k)),
        };
        Self { b0, b1, b2: 0.0, a1: (k - 1.0) / (k + 1.0), a2: 0.0 }
    }

    /// Gain at 0 Hz.
    fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Filter `input` (transposed direct form II) from the state a constant
    /// input of `initial` would settle into.
    fn run(&self, input: &[f64], initial: f64) -> Vec<f64> {
        let gain = self.dc_gain();
        let mut z1 = (gain - self.b0) * initial;
        let mut z2 = (self.b2 - self.a2 * gain) * initial;
        input
            .iter()
            .map(|&x| {
                let y = self.b0 * x + z1;
                z1 = self.b1 * x - self.a1 * y + z2;
                z2 = self.b2 * x - self.a2 * y;
                y
            })
            .collect()
    }
}

/// Butterworth low- or high-pass of `order` as cascaded sections.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn butterworth(pass: Pass, order: usize, cutoff_hz: f64, fs: f64) -> Vec<Section> {
    let n = order as f64;
    let mut sections: Vec<Section> = (1..=order / 2)
        .map(|k| {
            let q = 1.0 / (2.0 * (PI * (2.0 * k as f64 - 1.0) / (2.0 * n)).sin());
            Section::biquad(pass, cutoff_hz, fs, q)
        })
        .collect();
    if order % 2 == 1 {
        sections.push(Section::first_order(pass, cutoff_hz, fs));
    }
    sections
}

fn cascade(sections: &[Section], input: &[f64]) -> Vec<f64> {
    let Some(&first) = input.first() else {
        return Vec::new();
    };
    let mut level = first;
    let mut signal = input.to_vec();
    for section in sections {
        signal = section.run(&signal, level);
        level *= section.dc_gain();
    }
    signal
}

/// Zero-phase application of `sections` (forward, then backward).
#[must_use]
pub fn filtfilt(sections: &[Section], input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n < 2 {
        return input.to_vec();
    }
    let pad = (n - 1).min(3 * (2 * sections.len() + 1));

    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * input[0] - input[i]));
    extended.extend_from_slice(input);
    extended.extend((1..=pad).map(|i| 2.0 * input[n - 1] - input[n - 1 - i]));

    let mut forward = cascade(sections, &extended);
    forward.reverse();
    let mut backward = cascade(sections, &forward);
    backward.reverse();
    backward[pad..pad + n].to_vec()
}

/// Zero-phase Butterworth band-pass between `low_hz` and `high_hz`.
#[must_use]
pub fn bandpass(input: &[f64], low_hz: f64, high_hz: f64, fs: f64, order: usize) -> Vec<f64> {
    let mut sections = butterworth(Pass::High, order, low_hz, fs);
    sections.extend(butterworth(Pass::Low, order, high_hz, fs));
    filtfilt(&sections, input)
}

// =============================================================================
// SPECTRUM
// =============================================================================

/// Zero mean, unit (population) variance. A flat signal becomes all zeros.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalize(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    let n = input.len() as f64;
    let mean = input.iter().sum::<f64>() / n;
    let std = (input.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    if std <= FLAT_STD {
        return vec![0.0; input.len()];
    }
    input.iter().map(|v| (v - mean) / std).collect()
}

/// One-sided power spectral density.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub freqs: Vec<f64>,
    /// Power per Hz, index-aligned with `freqs`.
    pub psd: Vec<f64>,
}

impl Spectrum {
    /// Bin spacing in Hz.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.freqs.get(1).copied().unwrap_or(0.0)
    }

    /// Mean density over bins with `low_hz <= f <= high_hz`; 0 when no bin falls inside.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_power(&self, low_hz: f64, high_hz: f64) -> f64 {
        let (sum, count) = self
            .freqs
            .iter()
            .zip(&self.psd)
            .filter(|(f, _)| **f >= low_hz && **f <= high_hz)
            .fold((0.0, 0_usize), |(sum, count), (_, p)| (sum + p, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

/// Periodic Hann window.
#[allow(clippy::cast_precision_loss)]
fn hann(size: usize) -> Vec<f64> {
    (0..size).map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / size as f64).cos()).collect()
}

/// Welch-averaged PSD with Hann segments of `segment` samples and half overlap.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn welch(input: &[f64], fs: f64, segment: usize) -> Spectrum {
    let size = segment.min(input.len());
    if size < 2 {
        return Spectrum { freqs: Vec::new(), psd: Vec::new() };
    }
    let hop = size - size / 2;
    let bins = size / 2 + 1;
    let window = hann(size);
    let scale = 1.0 / (fs * window.iter().map(|w| w * w).sum::<f64>());

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);

    let mut psd = vec![0.0; bins];
    let mut segments = 0_usize;
    for start in (0..=input.len() - size).step_by(hop) {
        let chunk = &input[start..start + size];
        let mean = chunk.iter().sum::<f64>() / size as f64;
        let mut buffer: Vec<Complex<f64>> =
            chunk.iter().zip(&window).map(|(&s, &w)| Complex::new((s - mean) * w, 0.0)).collect();
        fft.process(&mut buffer);

        for (k, bin) in buffer.iter().take(bins).enumerate() {
            let one_sided = k != 0 && !(size % 2 == 0 && k == size / 2);
            let power = bin.norm_sqr() * scale;
            psd[k] += if one_sided { 2.0 * power } else { power };
        }
        segments += 1;
    }

    let count = segments as f64;
    psd.iter_mut().for_each(|p| *p /= count);
    let freqs = (0..bins).map(|k| k as f64 * fs / size as f64).collect();
    Spectrum { freqs, psd }
}

// =============================================================================
// FEATURES
// =============================================================================

/// Mean power of every band in [`BANDS`].
///
/// # Errors
///
/// Returns [`SignalError::Reading`] if a band power is not finite.
pub fn band_powers(spectrum: &Spectrum) -> Result<Features, SignalError> {
    Ok(Features::try_from_pairs(BANDS.iter().map(|b| (b.name, spectrum.mean_power(b.low_hz, b.high_hz))))?)
}

/// Full pipeline over one window of raw samples at [`SAMPLE_RATE_HZ`].
///
/// # Errors
///
/// Returns [`SignalError::TooShort`] below [`MIN_SAMPLES`] samples.
pub fn extract_features(raw: &[f64]) -> Result<Features, SignalError> {
    if raw.len() < MIN_SAMPLES {
        return Err(SignalError::TooShort { len: raw.len(), min: MIN_SAMPLES });
    }
    let filtered = bandpass(raw, PASSBAND_HZ.0, PASSBAND_HZ.1, SAMPLE_RATE_HZ, FILTER_ORDER);
    let normalized = normalize(&filtered);
    band_powers(&welch(&normalized, SAMPLE_RATE_HZ, WELCH_SEGMENT))
}

#[cfg(test)]
#[path = "dsp_test.rs"]
mod tests;
