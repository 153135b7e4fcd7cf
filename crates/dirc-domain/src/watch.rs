//! Watch entries - one configured directory and its cleanup policy

use crate::mode::CleaningMode;
use std::path::{Path, PathBuf};

/// A watched directory with its expiry threshold and cleaning mode
///
/// Loaders only build watch entries for paths that existed and were
/// directories at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    path: PathBuf,
    expiry_minutes: u64,
    mode: CleaningMode,
}

impl WatchEntry {
    /// Create a new watch entry
    pub fn new(path: impl Into<PathBuf>, expiry_minutes: u64, mode: CleaningMode) -> Self {
        Self {
            path: path.into(),
            expiry_minutes,
            mode,
        }
    }

    /// The watched directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age in minutes at which a child becomes eligible for deletion
    pub fn expiry_minutes(&self) -> u64 {
        self.expiry_minutes
    }

    /// Which kinds of children may be deleted
    pub fn mode(&self) -> CleaningMode {
        self.mode
    }
}
