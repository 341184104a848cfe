//! Bounded reading history backing the trend chart.
//!
//! DESIGN
//! ======
//! Appends at the tail and evicts exactly one entry from the head once the
//! length exceeds [`HISTORY_CAPACITY`], so the buffer always holds the most
//! recent readings in arrival order. There is a single writer (the render
//! dispatcher); readers only iterate the whole sequence.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use readings::{Reading, Timestamp};

/// Maximum number of readings retained for the trend chart.
pub const HISTORY_CAPACITY: usize = 50;

/// One buffered reading: its timestamp and band powers in wire order.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: Timestamp,
    pub values: Vec<f64>,
}

impl HistoryEntry {
    /// First band power, if the reading carried any bands.
    #[must_use]
    pub fn first_value(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

/// Fixed-capacity FIFO of recent readings.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadingHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for ReadingHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl ReadingHistory {
    /// Create an empty history holding at most `capacity` entries.
    ///
    /// A zero capacity is raised to one so the latest reading is always kept.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity + 1), capacity }
    }

    /// Append a reading, evicting the oldest entry on overflow.
    pub fn push(&mut self, reading: &Reading) {
        self.entries.push_back(HistoryEntry {
            timestamp: reading.timestamp.clone(),
            values: reading.values(),
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Oldest retained entry.
    #[must_use]
    pub fn head(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// First band power of every entry, oldest first. Entries without bands
    /// yield `None` so the chart can leave a gap at that index.
    #[must_use]
    pub fn trend_series(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(HistoryEntry::first_value).collect()
    }
}
