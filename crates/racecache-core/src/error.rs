//! Error types for the race cache tools.
//!
//! Every failure the fetcher can hit maps to one variant here, and each
//! variant's message names the cause so the binaries can print it as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the race cache library.
#[derive(Debug, Error)]
pub enum RaceCacheError {
    // Configuration errors
    #[error("Configuration error: {} must be set", .missing.join(" and "))]
    Config {
        /// Names of the environment variables that were absent.
        missing: Vec<String>,
    },

    // Upstream errors
    #[error("Airtable API returned status {status}")]
    Upstream { status: u16, body: String },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    // Serialization errors
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Result type alias for race cache operations.
pub type Result<T> = std::result::Result<T, RaceCacheError>;

impl From<std::io::Error> for RaceCacheError {
    fn from(err: std::io::Error) -> Self {
        RaceCacheError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for RaceCacheError {
    fn from(err: serde_json::Error) -> Self {
        RaceCacheError::Parse {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for RaceCacheError {
    fn from(err: reqwest::Error) -> Self {
        RaceCacheError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl RaceCacheError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        RaceCacheError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a parse error that has no underlying serde error.
    pub fn parse(message: impl Into<String>) -> Self {
        RaceCacheError::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Raw response body for upstream errors, if any.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            RaceCacheError::Upstream { body, .. } => Some(body),
            _ => None,
        }
    }
}
