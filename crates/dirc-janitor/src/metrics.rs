//! Metrics collection for cleanup passes

use dirc_domain::{DeletionRecord, EntryKind};
use std::path::PathBuf;

/// Outcome of one pass over a single watch entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Watched directory
    pub path: PathBuf,

    /// Files removed
    pub files_deleted: usize,

    /// Directory trees removed
    pub directories_deleted: usize,

    /// Bytes reclaimed, measured before removal
    pub bytes_reclaimed: u64,

    /// Children younger than the threshold
    pub not_expired: usize,

    /// Expired children the cleaning mode does not cover
    pub out_of_scope: usize,

    /// Children that disappeared before they could be handled
    pub vanished: usize,

    /// Children whose stat or removal failed
    pub failed: usize,

    /// Expired, in-scope children left alone because of dry-run mode
    pub dry_run_skipped: usize,

    /// Whether the watched directory itself could be listed
    pub listed: bool,

    /// Rows appended to the audit log
    pub rows_reported: usize,

    /// Whether writing the batch to the audit log failed
    pub reporting_failed: bool,
}

impl PassSummary {
    /// Empty summary for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Count a successful removal
    pub fn record_deletion(&mut self, record: &DeletionRecord) {
        match record.kind() {
            EntryKind::File => self.files_deleted += 1,
            EntryKind::Directory => self.directories_deleted += 1,
            EntryKind::Other => {}
        }
        self.bytes_reclaimed += record.size_bytes();
    }

    /// Total entries removed in this pass
    pub fn deleted(&self) -> usize {
        self.files_deleted + self.directories_deleted
    }
}

/// Metrics aggregated over every watch entry in a run
#[derive(Debug, Clone, Default)]
pub struct JanitorMetrics {
    /// Watch entries processed
    pub entries_processed: usize,

    /// Watch entries whose directory could not be listed
    pub entries_unlisted: usize,

    /// Files removed
    pub files_deleted: usize,

    /// Directory trees removed
    pub directories_deleted: usize,

    /// Bytes reclaimed
    pub bytes_reclaimed: u64,

    /// Children that vanished mid-pass
    pub vanished: usize,

    /// Children whose stat or removal failed
    pub failed: usize,

    /// Children left alone because of dry-run mode
    pub dry_run_skipped: usize,

    /// Batches the audit log rejected
    pub reporting_failures: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one pass into the totals
    pub fn record_pass(&mut self, pass: &PassSummary) {
        self.entries_processed += 1;
        if !pass.listed {
            self.entries_unlisted += 1;
        }
        self.files_deleted += pass.files_deleted;
        self.directories_deleted += pass.directories_deleted;
        self.bytes_reclaimed += pass.bytes_reclaimed;
        self.vanished += pass.vanished;
        self.failed += pass.failed;
        self.dry_run_skipped += pass.dry_run_skipped;
        if pass.reporting_failed {
            self.reporting_failures += 1;
        }
    }

    /// Get total entries removed
    pub fn total_deleted(&self) -> usize {
        self.files_deleted + self.directories_deleted
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Cleanup Summary".to_string(),
            "===============".to_string(),
            format!("Watch entries: {}", self.entries_processed),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
            format!("Files deleted: {}", self.files_deleted),
            format!("Directories deleted: {}", self.directories_deleted),
            format!("Bytes reclaimed: {}", self.bytes_reclaimed),
        ];

        if self.dry_run_skipped > 0 {
            lines.push(format!("Would delete (dry run): {}", self.dry_run_skipped));
        }
        if self.vanished > 0 {
            lines.push(format!("Already gone: {}", self.vanished));
        }
        if self.failed > 0 {
            lines.push(format!("Failed: {}", self.failed));
        }
        if self.entries_unlisted > 0 {
            lines.push(format!("Unreadable watch directories: {}", self.entries_unlisted));
        }
        if self.reporting_failures > 0 {
            lines.push(format!("Audit log failures: {}", self.reporting_failures));
        }

        lines.join("\n")
    }
}
