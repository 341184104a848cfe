//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{bar_chart::BarChartView, line_chart::LineChartView, status_panel::StatusPanel};
use crate::net::stream_client::{StreamClient, StreamConfig};
use crate::state::dashboard::DashboardState;

/// Root application component.
///
/// Owns the dashboard state signal and the stream client, provides both as
/// context, and starts the stream once mounted in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let dashboard = RwSignal::new(DashboardState::default());
    let client = StoredValue::new(StreamClient::new(StreamConfig::default()));

    provide_context(dashboard);
    provide_context(client);

    #[cfg(feature = "csr")]
    client.update_value(|c| {
        crate::net::stream_client::start_browser_stream(c, dashboard);
    });

    view! {
        <Title text="EEG Monitor"/>
        <main class="dashboard">
            <header class="dashboard__header">
                <h1>"EEG Monitor"</h1>
            </header>
            <StatusPanel/>
            <section class="dashboard__charts">
                <BarChartView/>
                <LineChartView/>
            </section>
        </main>
    }
}
