//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ValuationState;
use crate::constants::DEFAULT_BACKEND_URL;
use crate::models::HistoryEntry;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Ticker input
    pub ticker: String,
    pub cursor_position: usize,

    // Valuation
    pub valuation: ValuationState,
    /// Whether the fetch trigger is enabled
    pub can_fetch: bool,
    pub backend_url: String,
    pub last_time_ms: Option<u64>,

    // History, newest first
    pub history: Vec<HistoryEntry>,
    pub history_index: Option<usize>,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    pub fn is_loading(&self) -> bool {
        self.valuation.is_loading()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            ticker: String::new(),
            cursor_position: 0,
            valuation: ValuationState::Idle,
            can_fetch: false,
            backend_url: String::from(DEFAULT_BACKEND_URL),
            last_time_ms: None,
            history: Vec::new(),
            history_index: None,
            show_help: false,
        }
    }
}
