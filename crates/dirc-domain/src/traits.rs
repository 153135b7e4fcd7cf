//! Trait definitions for external interactions
//!
//! These traits define the boundary between the cleanup logic and the
//! machine it runs on. The janitor crate provides the real implementations;
//! tests substitute their own.

use crate::mode::EntryKind;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem facts about one directory child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    /// What the entry is; a symbolic link takes the kind of its target
    pub kind: EntryKind,

    /// Status-change time ("ctime"), not the content modification time
    pub status_changed: DateTime<Utc>,
}

/// Filesystem operations needed by a cleanup pass
///
/// Implemented by the janitor crate (`LocalFilesystem`). Errors of kind
/// [`io::ErrorKind::NotFound`] mean the entry is already gone.
pub trait EntryFilesystem {
    /// List the direct children of `dir` as full paths (non-recursive)
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Stat an entry; the times are the entry's own, even for a link
    fn inspect(&self, path: &Path) -> io::Result<EntryStat>;

    /// Size of an entry in bytes; for directories the total of the tree
    fn size_of(&self, path: &Path, kind: EntryKind) -> io::Result<u64>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it
    ///
    /// A link to a directory is unlinked; its target is left in place.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;
}

/// Source of the current time
pub trait Clock {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}
