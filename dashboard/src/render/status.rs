//! Status surface: emotion label plus indicator color.

use readings::Reading;

use crate::util::palette::Tone;

#[derive(Clone, Debug, PartialEq)]
pub struct StatusView {
    pub label: String,
    pub tone: Tone,
    /// Sender timestamp of the reading, rendered as-is.
    pub updated_at: String,
}

impl StatusView {
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.tone.color()
    }
}

#[must_use]
pub fn status_view(reading: &Reading) -> StatusView {
    StatusView {
        label: reading.emotion.clone(),
        tone: Tone::for_emotion(&reading.emotion),
        updated_at: reading.timestamp.to_string(),
    }
}
