//! The search vocabulary.
//!
//! [`DEFAULT_QUERIES`] is the built-in, ordered list of phrases sent to the
//! search provider. A YAML file can replace it at startup; see [`load_queries`].

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// Search phrases run on every aggregation, in this order.
pub const DEFAULT_QUERIES: &[&str] = &[
    "Job Mela 2025 India",
    "Campus Recruitment 2025",
    "Walk-in Drive for Freshers 2025",
    "Mega Job Fair 2025",
    "Upcoming Job Drives in India",
    "Government Job Mela 2025",
];

/// Accepted shapes of a queries file.
///
/// ```yaml
/// - Job Mela 2025 India
/// - Campus Recruitment 2025
/// ```
///
/// or
///
/// ```yaml
/// queries:
///   - Job Mela 2025 India
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QueriesFile {
    List(Vec<String>),
    Keyed { queries: Vec<String> },
}

/// Load search phrases from a YAML file.
///
/// Order and duplicates are preserved; blank entries are dropped.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_queries(path: &Path) -> Result<Vec<String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::QueriesRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_queries(&raw).map_err(|source| ConfigError::QueriesParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(count = parsed.len(), "Loaded queries file");
    Ok(parsed)
}

fn parse_queries(raw: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let queries = match serde_yaml::from_str::<QueriesFile>(raw)? {
        QueriesFile::List(q) | QueriesFile::Keyed { queries: q } => q,
    };
    Ok(queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect())
}
