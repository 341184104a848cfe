use super::*;
use crate::net::stream_client::ClientEvent;
use readings::parse_reading;

fn state_with(text: &str) -> DashboardState {
    let mut state = DashboardState::default();
    state.apply(ClientEvent::Reading(parse_reading(text).expect("reading")));
    state
}

#[test]
fn emotion_label_waits_for_first_reading() {
    assert_eq!(emotion_label(&DashboardState::default()), "Waiting for data");
    assert_eq!(status_tone(&DashboardState::default()), Tone::Neutral);
}

#[test]
fn emotion_label_and_tone_follow_latest_reading() {
    let state = state_with(r#"{"timestamp":"t1","emotion":"anxious","features":{"alpha":1}}"#);
    assert_eq!(emotion_label(&state), "anxious");
    assert_eq!(status_tone(&state), Tone::Alert);
    assert_eq!(format_updated_at(&state), "updated t1");
}

#[test]
fn format_counters_reports_all_tallies() {
    let mut state = state_with(r#"{"timestamp":1,"emotion":"calm","features":{}}"#);
    state.apply(ClientEvent::TransportError("x".to_owned()));
    assert_eq!(format_counters(&state), "1 readings | 0 rejected | 1 errors");
}

#[test]
fn connection_label_covers_every_status() {
    assert_eq!(connection_label(ConnectionStatus::Connected), "LIVE");
    assert_eq!(connection_label(ConnectionStatus::ReconnectPending), "RECONNECTING");
    assert_eq!(connection_label(ConnectionStatus::Stopped), "PAUSED");
    assert!(connection_class(ConnectionStatus::ReconnectPending).ends_with("--connecting"));
    assert!(connection_class(ConnectionStatus::Stopped).ends_with("--disconnected"));
}

#[test]
fn toggle_label_offers_resume_only_when_stopped() {
    assert_eq!(toggle_label(ConnectionStatus::Stopped), "Resume stream");
    assert_eq!(toggle_label(ConnectionStatus::Connected), "Pause stream");
    assert_eq!(toggle_label(ConnectionStatus::ReconnectPending), "Pause stream");
}
