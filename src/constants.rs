//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend serving the `/dcf` endpoint when no config overrides it
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Path of the valuation endpoint on the backend
pub const DCF_PATH: &str = "/dcf";

/// Shown for every transport failure; the cause only goes to the log
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Failed to fetch data. Please check the ticker or backend.";

/// Maximum number of lookups kept in the session history
pub const MAX_HISTORY: usize = 50;

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".dcf-tui";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "dcf-tui.log";

/// Application name
pub const APP_NAME: &str = "Mini Capital IQ - DCF Calculator";
