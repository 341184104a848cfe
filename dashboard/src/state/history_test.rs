use super::*;
use readings::Features;

fn reading(ts: f64, first: f64) -> Reading {
    let features = Features::try_from_pairs([("alpha", first), ("beta", first * 10.0)]).expect("features");
    Reading::new(Timestamp::Millis(ts), "calm", features)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn history_default_is_empty_with_fixed_capacity() {
    let history = ReadingHistory::default();
    assert!(history.is_empty());
    assert_eq!(history.capacity(), HISTORY_CAPACITY);
    assert_eq!(HISTORY_CAPACITY, 50);
}

#[test]
fn history_zero_capacity_still_keeps_latest() {
    let mut history = ReadingHistory::with_capacity(0);
    history.push(&reading(1.0, 1.0));
    history.push(&reading(2.0, 2.0));
    assert_eq!(history.len(), 1);
    assert_eq!(history.trend_series(), vec![Some(2.0)]);
}

// =============================================================
// push / eviction
// =============================================================

#[test]
fn push_below_capacity_keeps_every_reading() {
    let mut history = ReadingHistory::default();
    for i in 1..=HISTORY_CAPACITY {
        history.push(&reading(i as f64, i as f64));
        assert_eq!(history.len(), i);
    }
}

#[test]
fn push_past_capacity_evicts_from_head() {
    let mut history = ReadingHistory::default();
    let total = 73;
    for i in 1..=total {
        history.push(&reading(i as f64, i as f64));
        assert!(history.len() <= HISTORY_CAPACITY);
    }
    assert_eq!(history.len(), HISTORY_CAPACITY);
    // Head is the (N - 50 + 1)-th pushed reading.
    let expected_head = (total - HISTORY_CAPACITY + 1) as f64;
    assert_eq!(history.head().map(|e| e.timestamp.clone()), Some(Timestamp::Millis(expected_head)));
}

#[test]
fn fifty_one_readings_drop_only_the_first() {
    let mut history = ReadingHistory::default();
    for i in 1..=51 {
        history.push(&reading(i as f64, i as f64));
    }
    let expected: Vec<Option<f64>> = (2..=51).map(|v| Some(f64::from(v))).collect();
    assert_eq!(history.trend_series(), expected);
}

#[test]
fn history_preserves_arrival_order() {
    let mut history = ReadingHistory::with_capacity(3);
    for i in [5.0, 1.0, 4.0, 2.0] {
        history.push(&reading(i, i));
    }
    let order: Vec<f64> = history.iter().filter_map(HistoryEntry::first_value).collect();
    assert_eq!(order, vec![1.0, 4.0, 2.0]);
}

#[test]
fn push_records_all_values_in_band_order() {
    let mut history = ReadingHistory::default();
    history.push(&reading(1.0, 3.0));
    let entry = history.head().expect("entry");
    assert_eq!(entry.values, vec![3.0, 30.0]);
}

// =============================================================
// trend_series
// =============================================================

#[test]
fn trend_series_leaves_gap_for_reading_without_bands() {
    let mut history = ReadingHistory::default();
    history.push(&reading(1.0, 1.0));
    history.push(&Reading::new(Timestamp::Millis(2.0), "calm", Features::new()));
    history.push(&reading(3.0, 3.0));
    assert_eq!(history.trend_series(), vec![Some(1.0), None, Some(3.0)]);
}
