//! Error types for cleanup operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a cleanup pass
///
/// None of these abort a pass: the orchestrator logs them, skips the
/// affected entry and carries on.
#[derive(Error, Debug)]
pub enum CleanupError {
    /// Entry vanished between listing and stat or removal
    #[error("Entry not found (already gone): {}", path.display())]
    NotFound {
        /// Path of the missing entry
        path: PathBuf,
    },

    /// Removal failed (permission denied, I/O error)
    #[error("Failed to delete {}: {source}", path.display())]
    Deletion {
        /// Path that could not be removed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Audit log could not be opened or written
    #[error("Failed to write audit log {}: {source}", path.display())]
    Reporting {
        /// Configured audit log path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Watched directory could not be listed
    #[error("Failed to list watched directory {}: {source}", path.display())]
    Listing {
        /// Watched directory
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },
}

impl CleanupError {
    /// Map an I/O error from a stat or removal into the taxonomy
    ///
    /// `NotFound` becomes [`CleanupError::NotFound`]; everything else is a
    /// [`CleanupError::Deletion`].
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            CleanupError::NotFound { path }
        } else {
            CleanupError::Deletion { path, source }
        }
    }

    /// Whether this error means the entry was already gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, CleanupError::NotFound { .. })
    }
}
