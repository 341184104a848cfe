//! Shared SVG chrome for the charts: title, axes, gridlines, tick labels.

#[cfg(test)]
#[path = "chart_frame_test.rs"]
mod chart_frame_test;

use leptos::prelude::*;

use crate::render::ChartLayout;
use crate::util::chart_geometry::{PlotArea, ValueRange, format_tick, scale_y};

/// SVG attribute text for a coordinate.
pub(crate) fn coord(value: f64) -> String {
    format!("{value:.1}")
}

/// Y position and label of each horizontal gridline.
pub(crate) fn y_ticks(range: ValueRange, area: &PlotArea) -> Vec<(f64, String)> {
    range.ticks().into_iter().map(|v| (scale_y(v, range, area), format_tick(v))).collect()
}

/// Title, axes, and y gridlines for one chart. Drawn under the series.
pub(crate) fn chart_frame(layout: ChartLayout, range: ValueRange, area: PlotArea) -> impl IntoView {
    let ticks = y_ticks(range, &area)
        .into_iter()
        .map(|(y, label)| {
            view! {
                <g class="chart__tick">
                    <line class="chart__grid" x1=coord(area.left()) y1=coord(y) x2=coord(area.right()) y2=coord(y)></line>
                    <text class="chart__tick-label" x=coord(area.left() - 6.0) y=coord(y + 4.0)>{label}</text>
                </g>
            }
        })
        .collect_view();

    let center_x = area.left() + area.inner_width() / 2.0;
    let center_y = area.top() + area.inner_height() / 2.0;

    view! {
        <g class="chart__frame">
            <text class="chart__title" x=coord(area.width / 2.0) y="20">{layout.title}</text>
            {ticks}
            <line
                class="chart__axis"
                x1=coord(area.left())
                y1=coord(area.bottom())
                x2=coord(area.right())
                y2=coord(area.bottom())
            ></line>
            <line
                class="chart__axis"
                x1=coord(area.left())
                y1=coord(area.top())
                x2=coord(area.left())
                y2=coord(area.bottom())
            ></line>
            <text class="chart__axis-title" x=coord(center_x) y=coord(area.height - 6.0)>{layout.x_title}</text>
            <text
                class="chart__axis-title"
                x="14"
                y=coord(center_y)
                transform=format!("rotate(-90 14 {center_y:.1})")
            >
                {layout.y_title}
            </text>
        </g>
    }
}
