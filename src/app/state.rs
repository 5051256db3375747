//! App state - pure data structure with no I/O logic

use crate::constants::TRANSPORT_ERROR_MESSAGE;
use crate::messages::RenderState;
use crate::models::{DcfResponse, Valuation};
use crate::storage::Storage;

/// Where the current lookup stands
///
/// A fresh request always passes through `Loading`, so a result and an
/// error can never be on screen together.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ValuationState {
    #[default]
    Idle,
    Loading,
    Success(Valuation),
    PayloadError(String),
    TransportError(String),
}

impl ValuationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ValuationState::Loading)
    }
}

/// Inputs to [`reduce`]
#[derive(Clone, Debug, PartialEq)]
pub enum ValuationEvent {
    Requested,
    Received(DcfResponse),
    TransportFailed,
}

/// Single transition function for [`ValuationState`]
pub fn reduce(_state: ValuationState, event: ValuationEvent) -> ValuationState {
    match event {
        ValuationEvent::Requested => ValuationState::Loading,
        ValuationEvent::Received(DcfResponse::Valuation(valuation)) => {
            ValuationState::Success(valuation)
        }
        ValuationEvent::Received(DcfResponse::Failure { error }) => {
            ValuationState::PayloadError(error)
        }
        ValuationEvent::TransportFailed => {
            ValuationState::TransportError(String::from(TRANSPORT_ERROR_MESSAGE))
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Ticker input
    pub ticker: String,
    pub cursor_position: usize,

    // Valuation
    pub valuation: ValuationState,
    pub backend_url: String,
    pub next_request_id: u64,
    pub pending_request: Option<(u64, String)>,
    pub last_time_ms: Option<u64>,

    // History
    pub history_index: Option<usize>,
    pub storage: Storage,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_BACKEND_URL)
    }
}

impl AppState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        AppState {
            ticker: String::new(),
            cursor_position: 0,
            valuation: ValuationState::Idle,
            backend_url: backend_url.into(),
            next_request_id: 1,
            pending_request: None,
            last_time_ms: None,
            history_index: None,
            storage: Storage::new(),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Feed an event through [`reduce`]
    pub fn apply(&mut self, event: ValuationEvent) {
        let state = std::mem::take(&mut self.valuation);
        self.valuation = reduce(state, event);
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            ticker: self.ticker.clone(),
            cursor_position: self.cursor_position,
            valuation: self.valuation.clone(),
            can_fetch: self.can_fetch(),
            backend_url: self.backend_url.clone(),
            last_time_ms: self.last_time_ms,
            history: self.storage.history.iter().cloned().collect(),
            history_index: self.history_index,
            show_help: self.show_help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aapl() -> Valuation {
        Valuation {
            ticker: "AAPL".to_string(),
            intrinsic_value: 123.456,
            current_price: 150.0,
            wacc: 8.0,
            terminal_growth: 2.0,
        }
    }

    #[test]
    fn test_requested_always_loads() {
        let from = [
            ValuationState::Idle,
            ValuationState::Loading,
            ValuationState::Success(aapl()),
            ValuationState::PayloadError("x".into()),
            ValuationState::TransportError("y".into()),
        ];
        for state in from {
            assert_eq!(reduce(state, ValuationEvent::Requested), ValuationState::Loading);
        }
    }

    #[test]
    fn test_received_valuation() {
        let next = reduce(
            ValuationState::Loading,
            ValuationEvent::Received(DcfResponse::Valuation(aapl())),
        );
        assert_eq!(next, ValuationState::Success(aapl()));
    }

    #[test]
    fn test_received_payload_error() {
        let next = reduce(
            ValuationState::Loading,
            ValuationEvent::Received(DcfResponse::Failure {
                error: "Ticker not found".into(),
            }),
        );
        assert_eq!(next, ValuationState::PayloadError("Ticker not found".into()));
    }

    #[test]
    fn test_transport_failure_uses_fixed_message() {
        let next = reduce(ValuationState::Loading, ValuationEvent::TransportFailed);
        assert_eq!(
            next,
            ValuationState::TransportError(
                "Failed to fetch data. Please check the ticker or backend.".into()
            )
        );
        assert!(!next.is_loading());
    }

    #[test]
    fn test_failed_retry_clears_previous_success() {
        let shown = ValuationState::Success(aapl());
        let retry = reduce(shown, ValuationEvent::Requested);
        let failed = reduce(retry, ValuationEvent::TransportFailed);
        assert!(matches!(failed, ValuationState::TransportError(_)));
    }

    #[test]
    fn test_apply_updates_in_place() {
        let mut state = AppState::default();
        state.apply(ValuationEvent::Requested);
        assert!(state.valuation.is_loading());
        state.apply(ValuationEvent::Received(DcfResponse::Valuation(aapl())));
        assert_eq!(state.valuation, ValuationState::Success(aapl()));
    }

    #[test]
    fn test_initial_render_state() {
        let render = AppState::new("http://localhost:8000").to_render_state();
        assert_eq!(render.ticker, "");
        assert_eq!(render.valuation, ValuationState::Idle);
        assert!(!render.can_fetch);
        assert!(!render.is_loading());
        assert_eq!(render.backend_url, "http://localhost:8000");
    }
}
