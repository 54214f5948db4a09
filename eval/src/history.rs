//! Bounded calculation history.
//!
//! The evaluator itself is stateless; history is owned by the session layer
//! (e.g. the CLI), which records an entry after each successful expression
//! evaluation.

use std::collections::VecDeque;

/// Number of most recent entries a UI is expected to display.
pub const DISPLAY_WINDOW: usize = 10;

/// Hard cap on the number of retained entries; recording beyond it discards
/// the oldest entries.
pub const MAX_ENTRIES: usize = 100;

/// Single recorded calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Evaluated expression, as submitted.
    pub expression: String,
    /// Evaluation result.
    pub result: f64,
}

/// Bounded ordered sequence of recorded calculations, oldest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a calculation, discarding the oldest entry if the
    /// [`MAX_ENTRIES`] cap is reached.
    pub fn record(&mut self, expression: impl Into<String>, result: f64) {
        self.entries.push_back(HistoryEntry {
            expression: expression.into(),
            result,
        });
        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Iterates over all retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Iterates over the display window: the [`DISPLAY_WINDOW`] most recent
    /// entries, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        let skipped = self.entries.len().saturating_sub(DISPLAY_WINDOW);
        self.entries.iter().skip(skipped)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_and_iteration_order() {
        let mut history = History::new();
        history.record("1 + 1", 2.0);
        history.record("2 * 2", 4.0);

        let entries: Vec<_> = history.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].expression, "1 + 1");
        assert_eq!(entries[1].result, 4.0);
    }

    #[test]
    fn cap_discards_oldest_entries() {
        let mut history = History::new();
        for i in 0..150 {
            history.record(format!("{i} + 0"), f64::from(i));
        }

        assert_eq!(history.len(), MAX_ENTRIES);
        let first = history.entries().next().unwrap();
        assert_eq!(first.result, 50.0);
    }

    #[test]
    fn recent_returns_display_window() {
        let mut history = History::new();
        for i in 0..25 {
            history.record(format!("{i}"), f64::from(i));
        }

        let recent: Vec<_> = history.recent().collect();
        assert_eq!(recent.len(), DISPLAY_WINDOW);
        assert_eq!(recent[0].result, 15.0);
        assert_eq!(recent[9].result, 24.0);
    }

    #[test]
    fn clearing() {
        let mut history = History::new();
        history.record("1", 1.0);
        history.clear();
        assert!(history.is_empty());
    }
}
