//! Distribution snapshot: one bar per feature band of the current reading.

use readings::Reading;

use super::ChartLayout;
use crate::util::palette::Tone;

pub const DISTRIBUTION_LAYOUT: ChartLayout =
    ChartLayout { title: "EEG Power Distribution", x_title: "Frequency Band", y_title: "Power" };

#[derive(Clone, Debug, PartialEq)]
pub struct BarChart {
    pub layout: ChartLayout,
    /// Band names in wire order.
    pub categories: Vec<String>,
    /// Band powers, index-aligned with `categories`.
    pub values: Vec<f64>,
    pub tone: Tone,
}

impl BarChart {
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.tone.color()
    }
}

#[must_use]
pub fn distribution_chart(reading: &Reading) -> BarChart {
    BarChart {
        layout: DISTRIBUTION_LAYOUT,
        categories: reading.features.bands(),
        values: reading.features.values(),
        tone: Tone::for_emotion(&reading.emotion),
    }
}
