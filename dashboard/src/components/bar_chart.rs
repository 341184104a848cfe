//! Distribution bar chart (`barChart` region).

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use super::chart_frame::{chart_frame, coord};
use crate::render::bar::BarChart;
use crate::state::dashboard::DashboardState;
use crate::util::chart_geometry::{PlotArea, ValueRange, bar_rects};

/// Bar chart of the latest reading's band powers.
///
/// Reads only the bar surface, so trend and status updates never redraw it.
#[component]
pub fn BarChartView() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let bars = Memo::new(move |_| dashboard.with(|d| d.surfaces.bars.clone()));

    view! {
        <div id="barChart" class="chart">
            {move || {
                bars.with(|chart| match chart {
                    Some(chart) => bar_svg(chart, PlotArea::default()).into_any(),
                    None => view! { <p class="chart__placeholder">"Waiting for data"</p> }.into_any(),
                })
            }}
        </div>
    }
}

fn bar_svg(chart: &BarChart, area: PlotArea) -> impl IntoView + use<> {
    let range = ValueRange::including_zero(chart.values.iter().copied());
    let color = chart.color();
    let label_y = coord(area.bottom() + 16.0);

    let bars = bar_rects(&chart.values, range, &area)
        .into_iter()
        .zip(chart.categories.iter().cloned())
        .map(|(rect, band)| {
            view! {
                <g class="chart__bar">
                    <rect
                        x=coord(rect.x)
                        y=coord(rect.y)
                        width=coord(rect.width)
                        height=coord(rect.height)
                        fill=color
                    ></rect>
                    <text class="chart__category" x=coord(rect.center_x()) y=label_y.clone()>{band}</text>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg class="chart__svg" viewBox=area.view_box() role="img">
            {chart_frame(chart.layout, range, area)}
            {bars}
        </svg>
    }
}
