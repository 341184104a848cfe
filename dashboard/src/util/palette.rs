//! Emotion → indicator color mapping.
//!
//! A single distinguished label raises the alert color; every other label,
//! including empty and never-seen ones, is neutral.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

/// The one label that maps to [`Tone::Alert`]. Compared case-sensitively.
pub const ALERT_EMOTION: &str = "anxious";

pub const ALERT_COLOR: &str = "red";
pub const NEUTRAL_COLOR: &str = "green";

/// Binary indicator tone shared by the status dot and the bar chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    Alert,
    #[default]
    Neutral,
}

impl Tone {
    #[must_use]
    pub fn for_emotion(label: &str) -> Self {
        if label == ALERT_EMOTION { Self::Alert } else { Self::Neutral }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Alert => ALERT_COLOR,
            Self::Neutral => NEUTRAL_COLOR,
        }
    }

    /// BEM modifier class for the status dot.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Alert => "status-indicator status-indicator--alert",
            Self::Neutral => "status-indicator status-indicator--neutral",
        }
    }
}
