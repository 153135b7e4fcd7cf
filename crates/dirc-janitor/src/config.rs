//! Configuration for cleanup passes
//!
//! Holds the resolved audit log destination and operational modes. Built once
//! at startup and handed to the [`Janitor`](crate::Janitor).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use dirc_janitor::JanitorConfig;
///
/// // Reporting disabled, real deletions
/// let config = JanitorConfig::default();
/// assert!(config.audit_log.is_none());
///
/// // Append deletion records to a log file
/// let config = JanitorConfig::with_audit_log("/var/log/dirc.csv");
/// assert!(config.audit_log.is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Where deletion records are appended; `None` disables reporting
    #[serde(default)]
    pub audit_log: Option<PathBuf>,

    /// Dry-run mode: log what would be deleted without actually deleting
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

impl JanitorConfig {
    /// Configuration that reports to `path`
    pub fn with_audit_log(path: impl Into<PathBuf>) -> Self {
        Self {
            audit_log: Some(path.into()),
            ..Default::default()
        }
    }

    /// Build from a raw log location where an empty string means "disabled"
    pub fn from_log_location(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self::with_audit_log(trimmed)
        }
    }

    /// Enable or disable dry-run mode
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Audit log path, if reporting is enabled
    pub fn audit_log(&self) -> Option<&Path> {
        self.audit_log.as_deref()
    }
}
