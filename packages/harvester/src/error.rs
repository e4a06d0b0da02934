//! Typed errors for the harvester library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the
//! failure surface strongly typed for callers.

use thiserror::Error;

/// Errors that can occur while harvesting job postings.
///
/// The harvest is fatal-on-first-error: any of these aborts the run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status code
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Invalid URL format
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured CSS selector failed to compile
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spawned fetch or extraction task panicked or was aborted
    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
