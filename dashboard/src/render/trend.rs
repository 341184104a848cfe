//! Trend chart: first band power of each buffered reading against its index.

use super::ChartLayout;
use crate::state::history::ReadingHistory;

pub const TREND_LAYOUT: ChartLayout = ChartLayout { title: "EEG Power Time Series", x_title: "Time", y_title: "Power" };

pub const TREND_SERIES_NAME: &str = "EEG Power";

#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    pub layout: ChartLayout,
    pub series_name: &'static str,
    /// One sample per history entry, oldest first; `None` marks a gap.
    pub points: Vec<Option<f64>>,
}

impl Default for LineChart {
    fn default() -> Self {
        Self { layout: TREND_LAYOUT, series_name: TREND_SERIES_NAME, points: Vec::new() }
    }
}

impl LineChart {
    /// Plotted values with gaps removed.
    #[must_use]
    pub fn plotted(&self) -> Vec<f64> {
        self.points.iter().flatten().copied().collect()
    }
}

#[must_use]
pub fn trend_chart(history: &ReadingHistory) -> LineChart {
    LineChart { points: history.trend_series(), ..LineChart::default() }
}
