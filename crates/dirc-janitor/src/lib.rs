//! DirC Janitor
//!
//! Expiry evaluation and deletion engine for watched directories.
//!
//! # Overview
//!
//! For every watch entry the Janitor:
//! - **Lists** the direct children of the watched directory (non-recursive)
//! - **Classifies age** from each child's status-change time (ctime)
//! - **Filters by scope**: the entry's cleaning mode allows files, directories, or both
//! - **Deletes** files singly and directories as whole trees
//! - **Reports** the batch of deletion records to an append-only audit log
//!
//! A single failing child never aborts a pass, and a failing pass never
//! affects the next watch entry.
//!
//! # Usage
//!
//! ```no_run
//! use dirc_domain::{CleaningMode, WatchEntry};
//! use dirc_janitor::{Janitor, JanitorConfig};
//!
//! let mut janitor = Janitor::new(JanitorConfig::with_audit_log("dirc.csv"));
//! let entries = vec![
//!     WatchEntry::new("/tmp/downloads", 60 * 24, CleaningMode::FILES),
//!     WatchEntry::new("/tmp/builds", 60, CleaningMode::ALL),
//! ];
//!
//! let metrics = janitor.sweep(&entries);
//! println!("{}", metrics.summary());
//! ```
//!
//! # Audit Log
//!
//! Rows are `deleted_at,path,size_bytes,was_file,was_directory` with no
//! header. See [`reporter`] for the exact encoding.

#![warn(missing_docs)]

pub mod age;
mod config;
mod error;
pub mod executor;
pub mod fs;
mod janitor;
mod metrics;
pub mod reporter;
pub mod scope;

pub use config::JanitorConfig;
pub use error::CleanupError;
pub use executor::DeletionExecutor;
pub use fs::{LocalFilesystem, SystemClock};
pub use janitor::Janitor;
pub use metrics::{JanitorMetrics, PassSummary};
pub use reporter::AuditReporter;
