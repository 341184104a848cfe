use super::*;

#[test]
fn session_guard_tracks_active_count() {
    let state = AppState::new(Config::default());
    assert_eq!(state.active_sessions(), 0);

    let first = state.open_session();
    let second = state.open_session();
    assert_eq!(state.active_sessions(), 2);

    drop(first);
    assert_eq!(state.active_sessions(), 1);
    drop(second);
    assert_eq!(state.active_sessions(), 0);
}

#[test]
fn seeded_sessions_are_reproducible_but_distinct() {
    let config = Config { seed: Some(7), ..Config::default() };
    let a = AppState::new(config.clone());
    let b = AppState::new(config);

    let mut a1 = a.open_session();
    let mut a2 = a.open_session();
    let mut b1 = b.open_session();

    let first = a1.simulator.sample_features().unwrap();
    assert_eq!(first, b1.simulator.sample_features().unwrap());
    assert_ne!(first, a2.simulator.sample_features().unwrap());
}
