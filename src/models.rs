use serde::Deserialize;

/// A DCF valuation as returned by the backend
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub ticker: String,
    pub intrinsic_value: f64,
    pub current_price: f64,
    /// Percent, e.g. `8.0` for 8%
    pub wacc: f64,
    /// Percent
    pub terminal_growth: f64,
}

/// Body of a 2xx response from `/dcf`
///
/// The backend reports lookups it could not compute as `{"error": "..."}`.
/// `Failure` is listed first so a body carrying an `error` field is never
/// read as a valuation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DcfResponse {
    Failure { error: String },
    Valuation(Valuation),
}

/// Outcome of one finished lookup, as kept in history
#[derive(Clone, Debug, PartialEq)]
pub enum LookupOutcome {
    Valued { intrinsic_value: f64 },
    PayloadError(String),
    TransportError,
}

impl LookupOutcome {
    pub fn summary(&self) -> String {
        match self {
            LookupOutcome::Valued { intrinsic_value } => format!("${:.2}", intrinsic_value),
            LookupOutcome::PayloadError(error) => format!("error: {}", error),
            LookupOutcome::TransportError => String::from("failed"),
        }
    }
}

/// History entry
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub ticker: String,
    pub outcome: LookupOutcome,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    pub fn new(ticker: impl Into<String>, outcome: LookupOutcome) -> Self {
        HistoryEntry {
            ticker: ticker.into(),
            outcome,
            timestamp: chrono::Utc::now(),
        }
    }
}
