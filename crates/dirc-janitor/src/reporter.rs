//! Append-only audit log of deletions
//!
//! Each record becomes one comma-separated row:
//!
//! ```text
//! deleted_at,path,size_bytes,was_file,was_directory
//! 2024-08-01T12:00:03.120000Z,/tmp/watch/old.txt,512,true,false
//! ```
//!
//! There is no header row. Timestamps are RFC 3339 in UTC. Paths containing a
//! comma, quote or line break are quoted with embedded quotes doubled. On unix
//! paths are written as their raw bytes, so a non-UTF-8 name appears in the
//! log exactly as it was on disk.

use crate::error::CleanupError;
use chrono::SecondsFormat;
use dirc_domain::DeletionRecord;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes batches of deletion records to the audit log
#[derive(Debug, Clone, Default)]
pub struct AuditReporter {
    destination: Option<PathBuf>,
}

impl AuditReporter {
    /// Reporter appending to `destination`; `None` disables reporting
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self { destination }
    }

    /// Reporter that never writes
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Configured log path
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Append one row per record and return the number of rows written
    ///
    /// The log is opened in append mode (created if absent), written and
    /// closed within this call. An empty batch or a disabled reporter does
    /// not touch the filesystem.
    ///
    /// # Errors
    ///
    /// [`CleanupError::Reporting`] if the log cannot be opened or written.
    /// Already performed deletions are unaffected.
    pub fn report(&self, records: &[DeletionRecord]) -> Result<usize, CleanupError> {
        let Some(destination) = self.destination.as_deref() else {
            tracing::debug!("Audit reporting disabled, dropping {} record(s)", records.len());
            return Ok(0);
        };

        if records.is_empty() {
            return Ok(0);
        }

        let mut rows = Vec::new();
        for record in records {
            rows.extend_from_slice(&format_row(record));
            rows.push(b'\n');
        }

        append(destination, &rows).map_err(|source| CleanupError::Reporting {
            path: destination.to_path_buf(),
            source,
        })?;

        tracing::debug!("Appended {} row(s) to {}", records.len(), destination.display());
        Ok(records.len())
    }
}

fn append(destination: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(destination)?;
    file.write_all(bytes)?;
    file.flush()
}

/// Render a record as one CSV row (without the line terminator)
pub fn format_row(record: &DeletionRecord) -> Vec<u8> {
    let mut row = Vec::new();
    row.extend_from_slice(
        record
            .deleted_at()
            .to_rfc3339_opts(SecondsFormat::Micros, true)
            .as_bytes(),
    );
    row.push(b',');
    push_escaped(&mut row, &path_bytes(record.path()));
    row.extend_from_slice(
        format!(
            ",{},{},{}",
            record.size_bytes(),
            record.was_file(),
            record.was_directory()
        )
        .as_bytes(),
    );
    row
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

// Outside unix there is no byte view of a path; invalid sequences become U+FFFD.
#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

fn push_escaped(row: &mut Vec<u8>, field: &[u8]) {
    if !field.iter().any(|&b| matches!(b, b',' | b'"' | b'\n' | b'\r')) {
        row.extend_from_slice(field);
        return;
    }
    row.push(b'"');
    for &byte in field {
        if byte == b'"' {
            row.push(b'"');
        }
        row.push(byte);
    }
    row.push(b'"');
}
