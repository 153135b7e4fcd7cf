//! Scope filtering by cleaning mode

use dirc_domain::{CleaningMode, EntryKind};

/// Whether an entry with the given file-type flags may be deleted under `mode`
///
/// An entry that is neither a regular file nor a directory is never in scope.
pub fn is_in_scope(is_file: bool, is_directory: bool, mode: CleaningMode) -> bool {
    (is_file && mode.allows_files()) || (is_directory && mode.allows_directories())
}

/// Same check for an already classified [`EntryKind`]
pub fn kind_in_scope(kind: EntryKind, mode: CleaningMode) -> bool {
    is_in_scope(kind.is_file(), kind.is_directory(), mode)
}
