//! Render dispatcher: turns one reading into three surface updates.
//!
//! DESIGN
//! ======
//! Each surface model is built by a total function of its own input, and each
//! surface is drawn by its own component. A bad value in one surface cannot
//! abort the other two, and every update fully replaces the previous model.


pub mod bar;
pub mod status;
pub mod trend;

use readings::Reading;

use crate::state::history::ReadingHistory;

pub use self::bar::BarChart;
pub use self::status::StatusView;
pub use self::trend::LineChart;

/// Static chart title and axis captions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

/// Current model of every visual surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surfaces {
    /// `None` until the first reading arrives.
    pub status: Option<StatusView>,
    /// Snapshot of the latest reading only.
    pub bars: Option<BarChart>,
    /// Rebuilt from the whole history on every reading.
    pub trend: LineChart,
}

/// Apply one reading: status, distribution snapshot, then history + trend.
pub fn render(surfaces: &mut Surfaces, history: &mut ReadingHistory, reading: &Reading) {
    surfaces.status = Some(status::status_view(reading));
    surfaces.bars = Some(bar::distribution_chart(reading));
    history.push(reading);
    surfaces.trend = trend::trend_chart(history);
}
