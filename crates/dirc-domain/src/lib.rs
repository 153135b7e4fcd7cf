//! DirC Domain Layer
//!
//! Value types and trait seams shared by the cleanup engine and its loaders.
//!
//! ## Key Concepts
//!
//! - **Watch entry**: one configured directory plus its expiry and cleaning mode
//! - **Cleaning mode**: capability set controlling whether files, directories, or both may be deleted
//! - **Entry kind**: what a directory child turned out to be (file, directory, or anything else)
//! - **Deletion record**: an audit-trail entry describing one successful removal
//!
//! ## Architecture
//!
//! Nothing in this crate touches the filesystem. Filesystem access and the
//! notion of "now" are expressed as traits ([`traits::EntryFilesystem`],
//! [`traits::Clock`]) implemented by the janitor crate and by tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mode;
pub mod record;
pub mod traits;
pub mod watch;

// Re-exports for convenience
pub use mode::{CleaningMode, EntryKind, ModeParseError};
pub use record::DeletionRecord;
pub use traits::{Clock, EntryFilesystem, EntryStat};
pub use watch::WatchEntry;
