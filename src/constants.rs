//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "restview";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headers text for a fresh request (an empty JSON object)
pub const DEFAULT_HEADERS: &str = "{}";

/// Scheme prepended to URLs typed without one
pub const DEFAULT_SCHEME: &str = "https://";

/// File name used when exporting the current request
pub const EXPORT_FILE_NAME: &str = "api-request.json";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "restview.log";

/// Upper bound for a single HTTP call
pub const HTTP_TIMEOUT_SECS: u64 = 30;
