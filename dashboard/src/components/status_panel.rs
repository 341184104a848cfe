//! Status surface: emotion label, indicator dot, and stream telemetry.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `emotionState` / `statusIndicator` ids are the host-page regions the
//! status update targets. Connection state and counters sit alongside so a
//! stalled stream is visible without opening the console.

#[cfg(test)]
#[path = "status_panel_test.rs"]
mod status_panel_test;

use leptos::prelude::*;

use crate::net::stream_client::StreamClient;
use crate::state::dashboard::{ConnectionStatus, DashboardState};
use crate::util::palette::Tone;

/// Status panel at the top of the dashboard.
#[component]
pub fn StatusPanel() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let client = expect_context::<StoredValue<StreamClient>>();

    let emotion = move || dashboard.with(emotion_label);
    let tone = move || dashboard.with(status_tone);
    let connection = move || dashboard.with(|d| d.connection_status);
    let updated_at = move || dashboard.with(format_updated_at);
    let counters = move || dashboard.with(format_counters);
    let last_error = move || dashboard.with(|d| d.last_error.clone());

    let on_toggle = move |_| {
        #[cfg(feature = "csr")]
        client.update_value(|c| {
            if c.is_running() {
                crate::net::stream_client::stop_browser_stream(c, dashboard);
            } else {
                crate::net::stream_client::start_browser_stream(c, dashboard);
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = client;
    };

    view! {
        <section class="status-panel">
            <div class="status-panel__emotion">
                <span
                    id="statusIndicator"
                    class=move || tone().css_class()
                    style:background-color=move || tone().color()
                ></span>
                <span id="emotionState" class="status-panel__label">{emotion}</span>
            </div>
            <div class="status-panel__meta">
                <span class=move || connection_class(connection())>
                    {move || connection_label(connection())}
                </span>
                <span class="status-panel__item">{updated_at}</span>
                <span class="status-panel__item">{counters}</span>
                {move || {
                    last_error()
                        .map(|e| view! { <span class="status-panel__item status-panel__item--error">{e}</span> })
                }}
                <button class="status-panel__toggle" on:click=on_toggle>
                    {move || toggle_label(connection())}
                </button>
            </div>
        </section>
    }
}

fn emotion_label(state: &DashboardState) -> String {
    state
        .surfaces
        .status
        .as_ref()
        .map_or_else(|| "Waiting for data".to_owned(), |s| s.label.clone())
}

fn status_tone(state: &DashboardState) -> Tone {
    state.surfaces.status.as_ref().map_or(Tone::Neutral, |s| s.tone)
}

fn format_updated_at(state: &DashboardState) -> String {
    match &state.surfaces.status {
        Some(status) => format!("updated {}", status.updated_at),
        None => "updated --".to_owned(),
    }
}

fn format_counters(state: &DashboardState) -> String {
    format!(
        "{} readings | {} rejected | {} errors",
        state.readings_received, state.rejected_messages, state.transport_errors
    )
}

fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Disconnected => "DISCONNECTED",
        ConnectionStatus::Connecting => "CONNECTING",
        ConnectionStatus::Connected => "LIVE",
        ConnectionStatus::ReconnectPending => "RECONNECTING",
        ConnectionStatus::Stopped => "PAUSED",
    }
}

fn connection_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "status-panel__conn status-panel__conn--connected",
        ConnectionStatus::Connecting | ConnectionStatus::ReconnectPending => {
            "status-panel__conn status-panel__conn--connecting"
        }
        ConnectionStatus::Disconnected | ConnectionStatus::Stopped => {
            "status-panel__conn status-panel__conn--disconnected"
        }
    }
}

fn toggle_label(status: ConnectionStatus) -> &'static str {
    if status == ConnectionStatus::Stopped { "Resume stream" } else { "Pause stream" }
}
