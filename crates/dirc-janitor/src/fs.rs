//! Local filesystem and system clock implementations

use chrono::{DateTime, Utc};
use dirc_domain::{Clock, EntryFilesystem, EntryKind, EntryStat};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// [`EntryFilesystem`] backed by `std::fs`
///
/// A symbolic link is classified by its target: a link to a file counts as
/// a file, a link to a directory as a directory, and a dangling link as
/// [`EntryKind::Other`]. Removing a link only ever unlinks the link itself;
/// its target is left alone. Age and size are those of the link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem handle
    pub fn new() -> Self {
        Self
    }
}

impl EntryFilesystem for LocalFilesystem {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            children.push(entry?.path());
        }
        // Stable order keeps audit rows deterministic
        children.sort();
        Ok(children)
    }

    fn inspect(&self, path: &Path) -> io::Result<EntryStat> {
        let metadata = fs::symlink_metadata(path)?;
        let file_type = metadata.file_type();

        let kind = if file_type.is_symlink() {
            link_kind(path)
        } else {
            EntryKind::from_flags(file_type.is_file(), file_type.is_dir())
        };

        Ok(EntryStat {
            kind,
            status_changed: status_changed(&metadata)?,
        })
    }

    fn size_of(&self, path: &Path, kind: EntryKind) -> io::Result<u64> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.file_type().is_symlink() {
            return Ok(metadata.len());
        }
        match kind {
            EntryKind::Directory => Ok(tree_size(path)),
            _ => Ok(metadata.len()),
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        if fs::symlink_metadata(path)?.file_type().is_symlink() {
            // Unlink only; the target tree is not ours to remove
            return fs::remove_file(path);
        }
        fs::remove_dir_all(path)
    }
}

/// Kind of whatever the link at `path` points to
///
/// Dangling links, link loops and unreadable targets are all `Other`.
fn link_kind(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(target) => EntryKind::from_flags(target.is_file(), target.is_dir()),
        Err(e) => {
            tracing::debug!("Unresolvable link {}: {}", path.display(), e);
            EntryKind::Other
        }
    }
}

/// Total size of the regular files below `root`
///
/// Unreadable subentries are skipped; the measurement is informational.
fn tree_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry while sizing {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

#[cfg(unix)]
fn status_changed(metadata: &fs::Metadata) -> io::Result<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    DateTime::from_timestamp(metadata.ctime(), nanos).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("ctime out of range: {}", metadata.ctime()),
        )
    })
}

// No ctime outside unix: creation time is the closest equivalent.
#[cfg(not(unix))]
fn status_changed(metadata: &fs::Metadata) -> io::Result<DateTime<Utc>> {
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// [`Clock`] reading the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
