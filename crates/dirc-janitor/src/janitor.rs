//! Cleanup orchestration over watch entries

use crate::age::{self, Age};
use crate::executor::DeletionExecutor;
use crate::fs::{LocalFilesystem, SystemClock};
use crate::metrics::PassSummary;
use crate::reporter::AuditReporter;
use crate::scope;
use crate::{CleanupError, JanitorConfig, JanitorMetrics};
use dirc_domain::{Clock, DeletionRecord, EntryFilesystem, WatchEntry};
use std::path::Path;
use std::time::Instant;

/// What happened to one child of a watched directory
#[derive(Debug)]
enum ChildOutcome {
    Deleted(DeletionRecord),
    NotExpired,
    OutOfScope,
    WouldDelete,
}

/// Janitor service that cleans watched directories
///
/// Runs one pass per watch entry: list the direct children, delete those
/// that are expired and in scope, then append the batch of deletion records
/// to the audit log. Per-child failures are logged and skipped; nothing
/// stops a pass early.
///
/// # Examples
///
/// ```no_run
/// use dirc_domain::{CleaningMode, WatchEntry};
/// use dirc_janitor::{Janitor, JanitorConfig};
///
/// let config = JanitorConfig::with_audit_log("/var/log/dirc.csv");
/// let mut janitor = Janitor::new(config);
///
/// let entries = vec![WatchEntry::new("/tmp/watch", 60, CleaningMode::ALL)];
/// let metrics = janitor.sweep(&entries);
/// println!("{}", metrics.summary());
/// ```
pub struct Janitor<F = LocalFilesystem, C = SystemClock> {
    config: JanitorConfig,
    fs: F,
    clock: C,
    reporter: AuditReporter,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a Janitor over the local filesystem and system clock
    pub fn new(config: JanitorConfig) -> Self {
        Self::with_parts(config, LocalFilesystem, SystemClock)
    }
}

impl<F: EntryFilesystem, C: Clock> Janitor<F, C> {
    /// Create a Janitor with explicit filesystem and clock implementations
    pub fn with_parts(config: JanitorConfig, fs: F, clock: C) -> Self {
        let reporter = AuditReporter::new(config.audit_log.clone());
        Self {
            config,
            fs,
            clock,
            reporter,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one pass over every watch entry, in order
    ///
    /// Entries are independent: a failure in one never affects another.
    /// Returns the updated metrics after the sweep.
    pub fn sweep(&mut self, entries: &[WatchEntry]) -> JanitorMetrics {
        let start = Instant::now();

        for entry in entries {
            self.run(entry);
        }

        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;
        self.metrics.clone()
    }

    /// Run one pass over the direct children of `entry`
    pub fn run(&mut self, entry: &WatchEntry) -> PassSummary {
        let mut pass = PassSummary::new(entry.path());

        tracing::info!(
            "Cleaning {} (expiry: {} min, mode: {})",
            entry.path().display(),
            entry.expiry_minutes(),
            entry.mode()
        );

        let children = match self.fs.list_children(entry.path()) {
            Ok(children) => children,
            Err(source) => {
                let err = CleanupError::Listing {
                    path: entry.path().to_path_buf(),
                    source,
                };
                tracing::error!("{}", err);
                self.metrics.record_pass(&pass);
                return pass;
            }
        };
        pass.listed = true;

        let mut batch = Vec::new();
        for child in &children {
            match self.process_child(entry, child) {
                Ok(ChildOutcome::Deleted(record)) => {
                    pass.record_deletion(&record);
                    batch.push(record);
                }
                Ok(ChildOutcome::NotExpired) => pass.not_expired += 1,
                Ok(ChildOutcome::OutOfScope) => pass.out_of_scope += 1,
                Ok(ChildOutcome::WouldDelete) => pass.dry_run_skipped += 1,
                Err(CleanupError::NotFound { path }) => {
                    tracing::debug!("Skipping {}: already gone", path.display());
                    pass.vanished += 1;
                }
                Err(err) => {
                    tracing::error!("{}", err);
                    pass.failed += 1;
                }
            }
        }

        if !self.config.dry_run {
            match self.reporter.report(&batch) {
                Ok(rows) => pass.rows_reported = rows,
                Err(err) => {
                    // Deletions stand; the next run does not retry them
                    tracing::error!("{}", err);
                    pass.reporting_failed = true;
                }
            }
        }

        tracing::info!(
            "Finished {}: {} file(s) and {} directory(ies) deleted, {} failed",
            entry.path().display(),
            pass.files_deleted,
            pass.directories_deleted,
            pass.failed
        );

        self.metrics.record_pass(&pass);
        pass
    }

    /// Classify, filter and (unless dry-running) delete one child
    fn process_child(&self, entry: &WatchEntry, child: &Path) -> Result<ChildOutcome, CleanupError> {
        let stat = match age::classify(&self.fs, child, self.clock.now(), entry.expiry_minutes())? {
            Age::Fresh { elapsed_minutes } => {
                tracing::debug!(
                    "Keeping {}: {} min old, expires at {} min",
                    child.display(),
                    elapsed_minutes,
                    entry.expiry_minutes()
                );
                return Ok(ChildOutcome::NotExpired);
            }
            Age::Expired(stat) => stat,
        };

        if !scope::kind_in_scope(stat.kind, entry.mode()) {
            tracing::debug!(
                "Keeping {}: {} not covered by mode '{}'",
                child.display(),
                stat.kind,
                entry.mode()
            );
            return Ok(ChildOutcome::OutOfScope);
        }

        if self.config.dry_run {
            tracing::info!("DRY RUN: Would delete {} {}", stat.kind, child.display());
            return Ok(ChildOutcome::WouldDelete);
        }

        DeletionExecutor::new(&self.fs, &self.clock)
            .delete_entry(child, stat.kind)
            .map(ChildOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use dirc_domain::{CleaningMode, EntryKind, EntryStat};
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    // In-memory filesystem: one watched directory with flat children.
    #[derive(Default)]
    struct MockFs {
        entries: Mutex<HashMap<PathBuf, (EntryKind, DateTime<Utc>, u64)>>,
        deny: Vec<PathBuf>,
        // Listed, but gone by the time they are stat'ed
        vanished: Vec<PathBuf>,
        // Removed by someone else just before our own removal
        raced: Vec<PathBuf>,
    }

    impl MockFs {
        fn add(&self, path: &str, kind: EntryKind, changed: DateTime<Utc>, size: u64) {
            self.entries
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), (kind, changed, size));
        }

        fn contains(&self, path: &str) -> bool {
            self.entries.lock().unwrap().contains_key(Path::new(path))
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            if self.deny.iter().any(|p| p == path) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            if self.raced.iter().any(|p| p == path) {
                self.entries.lock().unwrap().remove(path);
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            self.entries
                .lock()
                .unwrap()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    impl EntryFilesystem for MockFs {
        fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
            if dir != Path::new("/watch") {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            let mut children: Vec<PathBuf> = self.entries.lock().unwrap().keys().cloned().collect();
            children.sort();
            Ok(children)
        }

        fn inspect(&self, path: &Path) -> io::Result<EntryStat> {
            if self.vanished.iter().any(|p| p == path) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            self.entries
                .lock()
                .unwrap()
                .get(path)
                .map(|(kind, changed, _)| EntryStat {
                    kind: *kind,
                    status_changed: *changed,
                })
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn size_of(&self, path: &Path, _kind: EntryKind) -> io::Result<u64> {
            self.entries
                .lock()
                .unwrap()
                .get(path)
                .map(|(_, _, size)| *size)
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.remove(path)
        }

        fn remove_tree(&self, path: &Path) -> io::Result<()> {
            self.remove(path)
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn minutes_ago(m: i64) -> DateTime<Utc> {
        now() - Duration::minutes(m)
    }

    fn janitor(fs: MockFs, config: JanitorConfig) -> Janitor<MockFs, FixedClock> {
        Janitor::with_parts(config, fs, FixedClock(now()))
    }

    #[test]
    fn test_janitor_creation() {
        let janitor = Janitor::new(JanitorConfig::default());
        assert_eq!(janitor.metrics().entries_processed, 0);
        assert_eq!(janitor.metrics().total_deleted(), 0);
        assert!(janitor.config().audit_log().is_none());
    }

    #[test]
    fn test_run_deletes_expired_in_scope() {
        let fs = MockFs::default();
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 512);
        fs.add("/watch/new.txt", EntryKind::File, minutes_ago(5), 10);
        fs.add("/watch/olddir", EntryKind::Directory, minutes_ago(90), 0);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::ALL));

        assert_eq!(pass.files_deleted, 1);
        assert_eq!(pass.directories_deleted, 1);
        assert_eq!(pass.not_expired, 1);
        assert_eq!(pass.bytes_reclaimed, 512);
        assert!(janitor.fs.contains("/watch/new.txt"));
        assert!(!janitor.fs.contains("/watch/old.txt"));
        assert!(!janitor.fs.contains("/watch/olddir"));
    }

    #[test]
    fn test_files_mode_keeps_directories() {
        let fs = MockFs::default();
        fs.add("/watch/a.log", EntryKind::File, minutes_ago(300), 1);
        fs.add("/watch/b.log", EntryKind::File, minutes_ago(300), 1);
        fs.add("/watch/cache", EntryKind::Directory, minutes_ago(300), 0);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::FILES));

        assert_eq!(pass.deleted(), 2);
        assert_eq!(pass.out_of_scope, 1);
        assert!(janitor.fs.contains("/watch/cache"));
    }

    #[test]
    fn test_other_kinds_are_never_deleted() {
        let fs = MockFs::default();
        fs.add("/watch/link", EntryKind::Other, minutes_ago(1000), 0);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let pass = janitor.run(&WatchEntry::new("/watch", 0, CleaningMode::ALL));

        assert_eq!(pass.deleted(), 0);
        assert_eq!(pass.out_of_scope, 1);
        assert!(janitor.fs.contains("/watch/link"));
    }

    #[test]
    fn test_permission_denied_does_not_stop_siblings() {
        let fs = MockFs {
            deny: vec![PathBuf::from("/watch/b.txt")],
            ..Default::default()
        };
        fs.add("/watch/a.txt", EntryKind::File, minutes_ago(120), 1);
        fs.add("/watch/b.txt", EntryKind::File, minutes_ago(120), 1);
        fs.add("/watch/c.txt", EntryKind::File, minutes_ago(120), 1);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::FILES));

        assert_eq!(pass.files_deleted, 2);
        assert_eq!(pass.failed, 1);
        assert!(janitor.fs.contains("/watch/b.txt"));
        assert!(!janitor.fs.contains("/watch/c.txt"));
    }

    #[test]
    fn test_child_gone_before_stat_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("audit.csv");
        let fs = MockFs {
            vanished: vec![PathBuf::from("/watch/b.txt")],
            ..Default::default()
        };
        fs.add("/watch/a.txt", EntryKind::File, minutes_ago(120), 3);
        fs.add("/watch/b.txt", EntryKind::File, minutes_ago(120), 5);
        fs.add("/watch/c.txt", EntryKind::File, minutes_ago(120), 7);

        let mut janitor = janitor(fs, JanitorConfig::with_audit_log(&log));
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::ALL));

        assert_eq!(pass.vanished, 1);
        assert_eq!(pass.failed, 0);
        assert_eq!(pass.files_deleted, 2);
        assert_eq!(pass.bytes_reclaimed, 10);
        assert_eq!(pass.rows_reported, 2);
        assert!(!janitor.fs.contains("/watch/a.txt"));
        assert!(!janitor.fs.contains("/watch/c.txt"));

        let contents = std::fs::read_to_string(&log).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.contains("b.txt"));
    }

    #[test]
    fn test_child_removed_concurrently_is_already_gone() {
        let fs = MockFs {
            raced: vec![PathBuf::from("/watch/olddir")],
            ..Default::default()
        };
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 1);
        fs.add("/watch/olddir", EntryKind::Directory, minutes_ago(120), 0);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::ALL));

        assert_eq!(pass.vanished, 1);
        assert_eq!(pass.failed, 0);
        assert_eq!(pass.files_deleted, 1);
        assert_eq!(pass.directories_deleted, 0);
        assert_eq!(janitor.metrics().vanished, 1);
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let fs = MockFs::default();
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 512);

        let mut janitor = janitor(fs, JanitorConfig::default().dry_run(true));
        let pass = janitor.run(&WatchEntry::new("/watch", 60, CleaningMode::ALL));

        assert_eq!(pass.deleted(), 0);
        assert_eq!(pass.dry_run_skipped, 1);
        assert!(janitor.fs.contains("/watch/old.txt"));
    }

    #[test]
    fn test_unlistable_directory_is_isolated() {
        let fs = MockFs::default();
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 1);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let entries = vec![
            WatchEntry::new("/missing", 60, CleaningMode::ALL),
            WatchEntry::new("/watch", 60, CleaningMode::ALL),
        ];
        let metrics = janitor.sweep(&entries);

        assert_eq!(metrics.entries_processed, 2);
        assert_eq!(metrics.entries_unlisted, 1);
        assert_eq!(metrics.files_deleted, 1);
    }

    #[test]
    fn test_second_pass_is_empty() {
        let fs = MockFs::default();
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 1);
        fs.add("/watch/new.txt", EntryKind::File, minutes_ago(1), 1);

        let mut janitor = janitor(fs, JanitorConfig::default());
        let entry = WatchEntry::new("/watch", 60, CleaningMode::ALL);

        assert_eq!(janitor.run(&entry).deleted(), 1);
        assert_eq!(janitor.run(&entry).deleted(), 0);
    }

    #[test]
    fn test_metrics_reset() {
        let fs = MockFs::default();
        fs.add("/watch/old.txt", EntryKind::File, minutes_ago(120), 1);

        let mut janitor = janitor(fs, JanitorConfig::default());
        janitor.sweep(&[WatchEntry::new("/watch", 60, CleaningMode::ALL)]);
        assert_eq!(janitor.metrics().entries_processed, 1);

        janitor.reset_metrics();
        assert_eq!(janitor.metrics().entries_processed, 0);
        assert_eq!(janitor.metrics().total_deleted(), 0);
    }
}
