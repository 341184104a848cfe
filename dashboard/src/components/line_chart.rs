//! Trend line chart (`lineChart` region).

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use super::chart_frame::{chart_frame, coord};
use crate::render::trend::LineChart;
use crate::state::dashboard::DashboardState;
use crate::util::chart_geometry::{PlotArea, ValueRange, plot_points, polyline_segments};

/// Line-plus-marker chart of the first band power across the history buffer.
#[component]
pub fn LineChartView() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let trend = Memo::new(move |_| dashboard.with(|d| d.surfaces.trend.clone()));

    view! {
        <div id="lineChart" class="chart">
            {move || {
                trend.with(|chart| {
                    if chart.points.is_empty() {
                        view! { <p class="chart__placeholder">"Waiting for data"</p> }.into_any()
                    } else {
                        line_svg(chart, PlotArea::default()).into_any()
                    }
                })
            }}
        </div>
    }
}

fn line_svg(chart: &LineChart, area: PlotArea) -> impl IntoView + use<> {
    let range = ValueRange::including_zero(chart.plotted());
    let points = plot_points(&chart.points, range, &area);

    let lines = polyline_segments(&points)
        .into_iter()
        .map(|p| view! { <polyline class="chart__line" points=p fill="none"></polyline> })
        .collect_view();

    let markers = points
        .iter()
        .flatten()
        .map(|&(x, y)| view! { <circle class="chart__marker" cx=coord(x) cy=coord(y) r="2.5"></circle> })
        .collect_view();

    view! {
        <svg class="chart__svg" viewBox=area.view_box() role="img">
            {chart_frame(chart.layout, range, area)}
            <text class="chart__legend" x=coord(area.right()) y=coord(area.top() - 8.0)>{chart.series_name}</text>
            {lines}
            {markers}
        </svg>
    }
}
