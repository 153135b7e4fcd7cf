//! Watch-list loading.
//!
//! The watch list is a JSON array:
//!
//! ```json
//! [
//!   { "path": "/tmp/watch", "expiry": 60, "type": "fd" },
//!   { "path": "/var/tmp/uploads", "expiry": 1440, "type": "f" }
//! ]
//! ```
//!
//! Elements are validated one by one; a bad element is skipped with a
//! warning and the rest still load.

use crate::error::{ConfigError, Result};
use dirc_domain::{CleaningMode, WatchEntry};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One element of the watch-list array, as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWatchEntry {
    /// Directory to clean
    pub path: String,

    /// Expiry threshold in minutes
    pub expiry: u64,

    /// Cleaning mode string ("f", "d" or "fd")
    #[serde(rename = "type")]
    pub mode: String,
}

impl RawWatchEntry {
    /// Validate into a [`WatchEntry`].
    ///
    /// The mode must parse and the path must currently be a directory.
    pub fn validate(self) -> Result<WatchEntry> {
        let mode = CleaningMode::parse(&self.mode)
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", self.path, e)))?;

        let path = Path::new(&self.path);
        if !path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "{}: does not exist or is not a directory",
                self.path
            )));
        }

        Ok(WatchEntry::new(path, self.expiry, mode))
    }
}

/// Load the watch list stored at `db_location`.
///
/// An empty location or a missing file yields an empty list.
///
/// # Errors
///
/// Unreadable file, malformed JSON, or a document that is not an array.
pub fn load_watch_list(db_location: &str) -> Result<Vec<WatchEntry>> {
    let location = db_location.trim();
    if location.is_empty() {
        tracing::warn!("No watch list configured");
        return Ok(Vec::new());
    }

    let path = Path::new(location);
    if !path.exists() {
        tracing::warn!("Watch list not found: {}", path.display());
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_watch_list(&contents)
}

/// Load the watch list, turning any error into an empty list.
pub fn load_watch_list_or_empty(db_location: &str) -> Vec<WatchEntry> {
    match load_watch_list(db_location) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("{}; no directories will be cleaned", e);
            Vec::new()
        }
    }
}

/// Parse and validate a watch-list document.
pub fn parse_watch_list(contents: &str) -> Result<Vec<WatchEntry>> {
    let document: Value = serde_json::from_str(contents)?;
    let Value::Array(elements) = document else {
        return Err(ConfigError::Invalid("watch list must be a JSON array".into()));
    };

    let mut entries = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let validated = serde_json::from_value::<RawWatchEntry>(element)
            .map_err(ConfigError::from)
            .and_then(RawWatchEntry::validate);

        match validated {
            Ok(entry) => {
                tracing::info!("Found directory: {}", entry.path().display());
                entries.push(entry);
            }
            Err(e) => tracing::warn!("Skipping watch entry #{}: {}", index, e),
        }
    }

    Ok(entries)
}
