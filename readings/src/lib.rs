//! Shared reading model and JSON codec for the EEG stream.
//!
//! This crate owns the wire representation used by both the simulator and the
//! dashboard. A reading is one JSON text message:
//!
//! ```json
//! { "timestamp": "2024-01-01T00:00:00Z", "emotion": "calm",
//!   "features": { "delta_power": 1.5, "alpha_power": 0.7 } }
//! ```
//!
//! DESIGN
//! ======
//! Feature bands keep their wire order. The bar chart axis and the trend
//! series both index into that order, so a plain hash map would scramble the
//! correspondence between frames. Parsing is parse-or-reject: duplicate band
//! names and non-finite powers are refused instead of trusted.


use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned by [`parse_reading`], [`encode_reading`] and feature
/// construction.
#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    /// The payload is not JSON or does not have the reading shape.
    #[error("malformed reading: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The same band name appeared twice in one reading.
    #[error("duplicate feature band: {0}")]
    DuplicateBand(String),
    /// A band power was NaN or infinite.
    #[error("feature band {band} has non-finite power {value}")]
    NonFinite { band: String, value: f64 },
    /// A band name was the empty string.
    #[error("feature band name is empty")]
    EmptyBand,
}

/// Point in time attached to a reading.
///
/// Senders use either an ISO-8601 string or a numeric epoch value; the
/// dashboard treats both as opaque labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Millis(ms) if ms.fract() == 0.0 => write!(f, "{ms:.0}"),
            Self::Millis(ms) => write!(f, "{ms}"),
        }
    }
}

/// Ordered band-name → power mapping with unique, non-empty names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Features {
    entries: Vec<(String, f64)>,
}

impl Features {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build features from ordered pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first pair [`Features::insert`] would reject.
    pub fn try_from_pairs<I, S>(pairs: I) -> Result<Self, ReadingError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut features = Self::new();
        for (band, power) in pairs {
            features.insert(band, power)?;
        }
        Ok(features)
    }

    /// Append a band at the end of the traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`ReadingError::EmptyBand`], [`ReadingError::DuplicateBand`] or
    /// [`ReadingError::NonFinite`]; the features are left unchanged.
    pub fn insert(&mut self, band: impl Into<String>, power: f64) -> Result<(), ReadingError> {
        let band = band.into();
        if band.is_empty() {
            return Err(ReadingError::EmptyBand);
        }
        if !power.is_finite() {
            return Err(ReadingError::NonFinite { band, value: power });
        }
        if self.get(&band).is_some() {
            return Err(ReadingError::DuplicateBand(band));
        }
        self.entries.push((band, power));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Power of a band by name.
    #[must_use]
    pub fn get(&self, band: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == band)
            .map(|(_, power)| *power)
    }

    /// `(band, power)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, power)| (name.as_str(), *power))
    }

    /// Band names in wire order.
    #[must_use]
    pub fn bands(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Band powers in wire order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, power)| *power).collect()
    }
}

impl Serialize for Features {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (band, power) in &self.entries {
            map.serialize_entry(band, power)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Features {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FeaturesVisitor)
    }
}

struct FeaturesVisitor;

impl<'de> Visitor<'de> for FeaturesVisitor {
    type Value = Features;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping band names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Features, A::Error> {
        let mut features = Features { entries: Vec::with_capacity(map.size_hint().unwrap_or(0)) };
        while let Some((band, power)) = map.next_entry::<String, f64>()? {
            features.insert(band, power).map_err(de::Error::custom)?;
        }
        Ok(features)
    }
}

/// One timestamped, labelled set of band powers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: Timestamp,
    /// Classifier label. Open-ended; consumers compare it as opaque text.
    pub emotion: String,
    pub features: Features,
}

impl Reading {
    #[must_use]
    pub fn new(timestamp: Timestamp, emotion: impl Into<String>, features: Features) -> Self {
        Self { timestamp, emotion: emotion.into(), features }
    }

    /// Band powers in wire order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.features.values()
    }
}

/// Parse one inbound text message into a validated [`Reading`].
///
/// # Errors
///
/// Returns [`ReadingError::Malformed`] when the text is not JSON, a required
/// field is missing or mistyped, or a band entry is invalid.
pub fn parse_reading(text: &str) -> Result<Reading, ReadingError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a reading as a JSON text message.
///
/// # Errors
///
/// Returns [`ReadingError::Malformed`] if serialization fails.
pub fn encode_reading(reading: &Reading) -> Result<String, ReadingError> {
    Ok(serde_json::to_string(reading)?)
}
