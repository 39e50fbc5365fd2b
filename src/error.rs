//! Error types for configuration, search requests, and file output.
//!
//! Only [`ConfigError`] is ever fatal. [`SearchError`] is logged and turned into
//! an empty result for the failing query, and [`OutputError`] is logged by the
//! startup run without stopping the server.

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration is missing or invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required secret was not provided or was blank.
    #[error("missing required setting {0}")]
    MissingSecret(&'static str),

    /// The search endpoint is not a valid absolute URL.
    #[error("invalid search endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The queries file could not be read.
    #[error("failed to read queries file {path}: {source}")]
    QueriesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The queries file is not valid YAML of the expected shape.
    #[error("failed to parse queries file {path}: {source}")]
    QueriesParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A single search request failed.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    /// Built with the URL stripped, since the URL carries the API key.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Writing or reading the results file failed.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
