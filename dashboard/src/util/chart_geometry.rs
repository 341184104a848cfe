//! Pure SVG geometry for the bar and line charts.
//!
//! Components hand chart models to these helpers and draw whatever comes
//! back; nothing here touches the DOM, so every frame is a full replacement
//! computed from data alone.

#[cfg(test)]
#[path = "chart_geometry_test.rs"]
mod chart_geometry_test;

/// Fraction of each bar slot left empty on either side of the bar.
const BAR_SLOT_PADDING: f64 = 0.15;

/// Drawing area of one chart in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self { width: 480.0, height: 280.0, margin_left: 56.0, margin_right: 16.0, margin_top: 36.0, margin_bottom: 48.0 }
    }
}

impl PlotArea {
    #[must_use]
    pub fn left(&self) -> f64 {
        self.margin_left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.width - self.margin_right
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.margin_top
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.right() - self.left()).max(0.0)
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        (self.bottom() - self.top()).max(0.0)
    }

    #[must_use]
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Vertical extent of a chart. Always spans zero and is never empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Smallest range covering zero and every value.
    pub fn including_zero<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if max - min < f64::EPSILON {
            Self { min, max: min + 1.0 }
        } else {
            Self { min, max }
        }
    }

    /// Height of the range, saturating at `f64::MAX`.
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.max - self.min).min(f64::MAX)
    }

    /// Axis labels: bottom, middle, top.
    #[must_use]
    pub fn ticks(&self) -> [f64; 3] {
        [self.min, self.min / 2.0 + self.max / 2.0, self.max]
    }

    /// Position of `value` within the range, 0 at `min` and 1 at `max`.
    ///
    /// Works on halved operands so ranges wider than `f64::MAX` stay finite.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        (clamped / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
    }
}

/// Map a value onto the SVG y axis (which grows downward).
#[must_use]
pub fn scale_y(value: f64, range: ValueRange, area: &PlotArea) -> f64 {
    area.bottom() - range.fraction(value) * area.inner_height()
}

/// X position of the `index`-th of `count` evenly spaced samples.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn index_x(index: usize, count: usize, area: &PlotArea) -> f64 {
    if count <= 1 {
        return area.left() + area.inner_width() / 2.0;
    }
    area.left() + index as f64 / (count - 1) as f64 * area.inner_width()
}

/// One bar in SVG coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Lay out one bar per value across the plot width, growing from zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_rects(values: &[f64], range: ValueRange, area: &PlotArea) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = area.inner_width() / values.len() as f64;
    let zero_y = scale_y(0.0, range, area);
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let value_y = scale_y(value, range, area);
            BarRect {
                x: area.left() + i as f64 * slot + slot * BAR_SLOT_PADDING,
                y: zero_y.min(value_y),
                width: slot * (1.0 - 2.0 * BAR_SLOT_PADDING),
                height: (zero_y - value_y).abs(),
            }
        })
        .collect()
}

/// Project an index-based series into SVG points, keeping gaps as `None`.
#[must_use]
pub fn plot_points(series: &[Option<f64>], range: ValueRange, area: &PlotArea) -> Vec<Option<(f64, f64)>> {
    series
        .iter()
        .enumerate()
        .map(|(i, value)| value.map(|v| (index_x(i, series.len(), area), scale_y(v, range, area))))
        .collect()
}

/// `points` attributes for one `<polyline>` per unbroken run of samples.
#[must_use]
pub fn polyline_segments(points: &[Option<(f64, f64)>]) -> Vec<String> {
    points
        .split(Option::is_none)
        .filter(|run| !run.is_empty())
        .map(|run| {
            run.iter()
                .flatten()
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Axis label text for a tick value.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
