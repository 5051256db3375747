//! # DCF TUI
//!
//! A minimal terminal client that asks a valuation backend for the
//! discounted-cash-flow value of a stock ticker.
//!
//! ## Features
//! - Ticker input with cursor editing
//! - One GET per lookup against `<backend>/dcf?ticker=...`
//! - Success, payload-error and transport-error rendering
//! - Session history with recall
//! - YAML config for backend URL and optional timeout
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use models::{DcfResponse, HistoryEntry, LookupOutcome, Valuation};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{reduce, AppActor, AppState, ValuationEvent, ValuationState};
pub use network::{FetchError, NetworkActor, ReqwestTransport, ValuationTransport};
