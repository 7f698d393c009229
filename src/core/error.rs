// src/core/error.rs

use thiserror::Error;

/// Failures of the HTTP fetch that precedes an analysis. The `Display` text is
/// what the user sees; no report is produced when one of these occurs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: reqwest::StatusCode },
}

/// Failures writing or clearing persisted reports.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize reports: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
