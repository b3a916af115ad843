// SPDX-License-Identifier: MPL-2.0
//! Serializable lifecycle report and atomic file export.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DiagnosticEvent;
use crate::error::Result;

/// Snapshot of the lifecycle log, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub crate_version: String,
    pub collection_started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub event_count: usize,
    pub events: Vec<DiagnosticEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(collection_started_at: DateTime<Utc>, events: Vec<DiagnosticEvent>) -> Self {
        Self {
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at,
            generated_at: Utc::now(),
            event_count: events.len(),
            events,
        }
    }

    /// Renders the report as pretty-printed TOML.
    ///
    /// # Errors
    ///
    /// Returns a config error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Writes content to a temp file and renames it over `path`.
///
/// This prevents partial writes from corrupting the target file.
///
/// # Errors
///
/// Returns an error if writing or renaming fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("toml.tmp");

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
