//! Age classification of directory children
//!
//! Age is measured from the entry's status-change time (ctime), not its
//! modification time. A file rewritten in place keeps its ctime on some
//! filesystems and may therefore expire while still being written to.

use crate::error::CleanupError;
use chrono::{DateTime, Utc};
use dirc_domain::{Clock, EntryFilesystem, EntryStat};
use std::path::Path;

/// Outcome of classifying one entry against an expiry threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    /// Old enough to delete; carries the stat used for the decision
    Expired(EntryStat),

    /// Younger than the threshold
    Fresh {
        /// Rounded age in minutes
        elapsed_minutes: u64,
    },
}

impl Age {
    /// Whether the entry is expired
    pub fn is_expired(&self) -> bool {
        matches!(self, Age::Expired(_))
    }
}

/// Whole minutes elapsed between `status_changed` and `now`
///
/// Rounds half up: 59m30s counts as 60 minutes, 59m29s as 59. A status-change
/// time in the future (clock skew) counts as zero minutes.
pub fn elapsed_minutes(status_changed: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed = now.signed_duration_since(status_changed);
    let millis = elapsed.num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    (millis as f64 / 60_000.0).round() as u64
}

/// Inclusive threshold check: an entry exactly at the threshold is expired
pub fn is_past_threshold(elapsed_minutes: u64, expiry_minutes: u64) -> bool {
    elapsed_minutes >= expiry_minutes
}

/// Stat `path` and classify it against `expiry_minutes` at instant `now`
///
/// # Errors
///
/// [`CleanupError::NotFound`] if the entry vanished since it was listed.
pub fn classify<F: EntryFilesystem>(
    fs: &F,
    path: &Path,
    now: DateTime<Utc>,
    expiry_minutes: u64,
) -> Result<Age, CleanupError> {
    let stat = fs
        .inspect(path)
        .map_err(|e| CleanupError::from_io(path, e))?;

    let elapsed = elapsed_minutes(stat.status_changed, now);
    if is_past_threshold(elapsed, expiry_minutes) {
        Ok(Age::Expired(stat))
    } else {
        Ok(Age::Fresh { elapsed_minutes: elapsed })
    }
}

/// Whether the entry at `path` is expired relative to `expiry_minutes`
pub fn is_expired<F: EntryFilesystem, C: Clock>(
    fs: &F,
    clock: &C,
    path: &Path,
    expiry_minutes: u64,
) -> Result<bool, CleanupError> {
    classify(fs, path, clock.now(), expiry_minutes).map(|age| age.is_expired())
}
