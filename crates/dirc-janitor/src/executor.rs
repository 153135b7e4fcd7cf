//! Deletion of single directory children

use crate::error::CleanupError;
use dirc_domain::{Clock, DeletionRecord, EntryFilesystem, EntryKind};
use std::io;
use std::path::Path;

/// Removes files and directory trees and records what was removed
///
/// The caller has already decided the entry is expired and in scope;
/// nothing here prompts or re-checks policy.
pub struct DeletionExecutor<'a, F, C> {
    fs: &'a F,
    clock: &'a C,
}

impl<'a, F: EntryFilesystem, C: Clock> DeletionExecutor<'a, F, C> {
    /// Create an executor over the given filesystem and clock
    pub fn new(fs: &'a F, clock: &'a C) -> Self {
        Self { fs, clock }
    }

    /// Delete `path` according to `kind` and return its record
    ///
    /// Files are removed singly, directories as a whole tree. The size is
    /// measured before removal and the timestamp taken after it.
    ///
    /// # Errors
    ///
    /// - [`CleanupError::NotFound`] if the entry is already gone
    /// - [`CleanupError::Deletion`] for permission or I/O failures, and for
    ///   entries that are neither files nor directories
    pub fn delete_entry(&self, path: &Path, kind: EntryKind) -> Result<DeletionRecord, CleanupError> {
        if kind == EntryKind::Other {
            return Err(CleanupError::Deletion {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "neither a regular file nor a directory",
                ),
            });
        }

        let size_bytes = self
            .fs
            .size_of(path, kind)
            .map_err(|e| CleanupError::from_io(path, e))?;

        let removed = match kind {
            EntryKind::Directory => self.fs.remove_tree(path),
            _ => self.fs.remove_file(path),
        };
        removed.map_err(|e| CleanupError::from_io(path, e))?;

        let deleted_at = self.clock.now();
        tracing::info!("Deleted {} {} ({} bytes)", kind, path.display(), size_bytes);

        DeletionRecord::new(path, size_bytes, kind, deleted_at).ok_or_else(|| CleanupError::Deletion {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "unrecordable entry kind"),
        })
    }
}
