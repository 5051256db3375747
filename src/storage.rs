use crate::constants::MAX_HISTORY;
use crate::models::HistoryEntry;
use std::collections::VecDeque;

/// Session history of finished lookups, newest first. Never written to disk.
#[derive(Default)]
pub struct Storage {
    pub history: VecDeque<HistoryEntry>,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            history: VecDeque::with_capacity(MAX_HISTORY),
        }
    }

    /// Add entry to history
    pub fn add_to_history(&mut self, entry: HistoryEntry) {
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_back();
        }
        self.history.push_front(entry);
    }

    /// Get history item by index (0 = most recent)
    pub fn get_history(&self, index: usize) -> Option<&HistoryEntry> {
        self.history.get(index)
    }

    /// History length
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LookupOutcome;

    #[test]
    fn test_newest_entry_first() {
        let mut storage = Storage::new();
        storage.add_to_history(HistoryEntry::new("AAPL", LookupOutcome::TransportError));
        storage.add_to_history(HistoryEntry::new("MSFT", LookupOutcome::TransportError));

        assert_eq!(storage.history_len(), 2);
        assert_eq!(storage.get_history(0).unwrap().ticker, "MSFT");
        assert_eq!(storage.get_history(1).unwrap().ticker, "AAPL");
        assert!(storage.get_history(2).is_none());
    }

    #[test]
    fn test_history_is_capped() {
        let mut storage = Storage::new();
        for i in 0..MAX_HISTORY + 5 {
            storage.add_to_history(HistoryEntry::new(format!("T{}", i), LookupOutcome::TransportError));
        }

        assert_eq!(storage.history_len(), MAX_HISTORY);
        assert_eq!(
            storage.get_history(0).unwrap().ticker,
            format!("T{}", MAX_HISTORY + 4)
        );
        assert_eq!(
            storage.get_history(MAX_HISTORY - 1).unwrap().ticker,
            "T5"
        );
    }
}
