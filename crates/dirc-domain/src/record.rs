//! Deletion records - the audit trail of one successful removal

use crate::mode::EntryKind;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Description of one entry the cleaner removed
///
/// Records only exist for removals that succeeded, so every field is set at
/// construction time. `deleted_at` is the completion time of the removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRecord {
    path: PathBuf,
    size_bytes: u64,
    kind: EntryKind,
    deleted_at: DateTime<Utc>,
}

impl DeletionRecord {
    /// Create a record for a completed removal
    ///
    /// Returns `None` for [`EntryKind::Other`], which is never removed.
    pub fn new(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        kind: EntryKind,
        deleted_at: DateTime<Utc>,
    ) -> Option<Self> {
        if kind == EntryKind::Other {
            return None;
        }

        Some(Self {
            path: path.into(),
            size_bytes,
            kind,
            deleted_at,
        })
    }

    /// Full path of the removed entry
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes measured right before removal
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Kind of the removed entry (file or directory)
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the removed entry was a regular file
    pub fn was_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Whether the removed entry was a directory
    pub fn was_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// When the removal completed
    pub fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }
}
