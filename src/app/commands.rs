//! Command handlers - business logic for processing UI events

use crate::app::state::{AppState, ValuationEvent};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{DcfResponse, HistoryEntry, LookupOutcome};

impl AppState {
    // ========================
    // Ticker input
    // ========================

    /// Replace the ticker wholesale. No validation.
    pub fn set_ticker(&mut self, new_value: impl Into<String>) {
        self.ticker = new_value.into();
        self.cursor_position = self.ticker.len();
    }

    pub fn clear_ticker(&mut self) {
        self.set_ticker(String::new());
        self.history_index = None;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let new_pos = self.ticker[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.ticker.len() {
            let new_pos = self.ticker[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.ticker.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if cursor_pos <= self.ticker.len() {
            self.ticker.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
            self.history_index = None;
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let prev_pos = self.ticker[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.ticker.remove(prev_pos);
            self.cursor_position = prev_pos;
            self.history_index = None;
        }
    }

    // ========================
    // Valuation
    // ========================

    /// The fetch trigger is enabled only with a ticker and nothing in flight
    pub fn can_fetch(&self) -> bool {
        !self.ticker.is_empty() && !self.valuation.is_loading()
    }

    /// Start a lookup for the current ticker
    pub fn fetch_valuation(&mut self) -> Option<NetworkCommand> {
        if !self.can_fetch() {
            return None;
        }

        let id = self.next_id();
        let ticker = self.ticker.clone();
        self.apply(ValuationEvent::Requested);
        self.pending_request = Some((id, ticker.clone()));
        self.history_index = None;

        Some(NetworkCommand::FetchValuation { id, ticker })
    }

    /// Handle network response
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let ticker = match &self.pending_request {
            Some((id, ticker)) if *id == response.id() => ticker.clone(),
            _ => {
                tracing::debug!(id = response.id(), "Ignoring response for stale request");
                return;
            }
        };
        self.pending_request = None;
        self.last_time_ms = Some(response.time_ms());

        let outcome = match response {
            NetworkResponse::Completed { payload, .. } => {
                let outcome = match &payload {
                    DcfResponse::Valuation(v) => LookupOutcome::Valued {
                        intrinsic_value: v.intrinsic_value,
                    },
                    DcfResponse::Failure { error } => LookupOutcome::PayloadError(error.clone()),
                };
                self.apply(ValuationEvent::Received(payload));
                outcome
            }
            NetworkResponse::Failed { message, .. } => {
                tracing::debug!(ticker = %ticker, cause = %message, "Lookup failed");
                self.apply(ValuationEvent::TransportFailed);
                LookupOutcome::TransportError
            }
        };

        self.storage.add_to_history(HistoryEntry::new(ticker, outcome));
    }

    // ========================
    // History
    // ========================

    pub fn history_prev(&mut self) {
        if self.storage.history_len() == 0 {
            return;
        }

        let new_index = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.storage.history_len() => i + 1,
            Some(i) => i,
        };

        if let Some(entry) = self.storage.get_history(new_index) {
            let ticker = entry.ticker.clone();
            self.set_ticker(ticker);
            self.history_index = Some(new_index);
        }
    }

    pub fn history_next(&mut self) {
        match self.history_index {
            Some(idx) if idx > 0 => {
                if let Some(entry) = self.storage.get_history(idx - 1) {
                    let ticker = entry.ticker.clone();
                    self.set_ticker(ticker);
                    self.history_index = Some(idx - 1);
                }
            }
            Some(_) => {
                // Back to newest/empty
                self.set_ticker(String::new());
                self.history_index = None;
            }
            None => {}
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
