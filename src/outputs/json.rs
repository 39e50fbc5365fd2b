//! JSON file output for the startup run.
//!
//! The result set is written as a pretty-printed JSON array with four-space
//! indentation. `serde_json` leaves non-ASCII characters as literal UTF-8, so
//! titles in Hindi or Tamil stay readable in the file.
//!
//! # Overwrite Semantics
//!
//! Every run replaces the whole file. Nothing from a previous run is read or
//! merged.

use crate::error::OutputError;
use crate::models::Event;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize events the way [`write_results`] stores them.
pub fn to_pretty_json(events: &[Event]) -> Result<Vec<u8>, OutputError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    events.serialize(&mut ser)?;
    Ok(buf)
}

/// Write events to `path`, replacing any existing file.
///
/// Missing parent directories are created.
#[instrument(level = "info", skip_all, fields(path = %path.display(), events = events.len()))]
pub async fn write_results(events: &[Event], path: &Path) -> Result<(), OutputError> {
    let json = to_pretty_json(events)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(path, json).await.map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote results file");
    Ok(())
}
