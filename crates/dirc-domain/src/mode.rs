//! Cleaning modes and entry kinds

use std::fmt;

/// Kind of a directory child as seen by the cleaner
///
/// Dangling symbolic links, sockets, fifos and devices are all
/// [`EntryKind::Other`] and are never eligible for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,

    /// Directory (removed as a whole tree)
    Directory,

    /// Anything that is neither a regular file nor a directory
    Other,
}

impl EntryKind {
    /// Build a kind from the two file-type flags reported by the filesystem
    pub fn from_flags(is_file: bool, is_directory: bool) -> Self {
        match (is_file, is_directory) {
            (true, false) => EntryKind::File,
            (false, true) => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }

    /// Whether this is a regular file
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Whether this is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode string cannot be turned into a [`CleaningMode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeParseError {
    /// The string contained a character other than 'f' or 'd'
    UnknownFlag(char),

    /// The string granted no capability at all
    Empty,
}

impl fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeParseError::UnknownFlag(c) => {
                write!(f, "unknown cleaning mode flag '{}' (expected 'f' and/or 'd')", c)
            }
            ModeParseError::Empty => write!(f, "cleaning mode must contain 'f', 'd' or both"),
        }
    }
}

impl std::error::Error for ModeParseError {}

/// Set of deletion capabilities for one watch entry
///
/// Parsed once from the watch list's `type` string: `"f"` allows files,
/// `"d"` allows directories, `"fd"` (or `"df"`) allows both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CleaningMode {
    files: bool,
    directories: bool,
}

impl CleaningMode {
    /// Delete regular files only
    pub const FILES: CleaningMode = CleaningMode { files: true, directories: false };

    /// Delete directories only
    pub const DIRECTORIES: CleaningMode = CleaningMode { files: false, directories: true };

    /// Delete both files and directories
    pub const ALL: CleaningMode = CleaningMode { files: true, directories: true };

    /// Whether regular files may be deleted
    pub fn allows_files(&self) -> bool {
        self.files
    }

    /// Whether directories may be deleted
    pub fn allows_directories(&self) -> bool {
        self.directories
    }

    /// Whether an entry of `kind` may be deleted under this mode
    pub fn allows(&self, kind: EntryKind) -> bool {
        match kind {
            EntryKind::File => self.files,
            EntryKind::Directory => self.directories,
            EntryKind::Other => false,
        }
    }

    /// Parse a mode string such as `"f"`, `"d"` or `"fd"`
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// - [`ModeParseError::UnknownFlag`] for any character other than 'f' or 'd'
    /// - [`ModeParseError::Empty`] if the string grants no capability
    pub fn parse(s: &str) -> Result<Self, ModeParseError> {
        let mut mode = CleaningMode { files: false, directories: false };
        for c in s.trim().chars() {
            match c {
                'f' => mode.files = true,
                'd' => mode.directories = true,
                other => return Err(ModeParseError::UnknownFlag(other)),
            }
        }

        if !mode.files && !mode.directories {
            return Err(ModeParseError::Empty);
        }
        Ok(mode)
    }
}

impl std::str::FromStr for CleaningMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CleaningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files {
            f.write_str("f")?;
        }
        if self.directories {
            f.write_str("d")?;
        }
        Ok(())
    }
}
