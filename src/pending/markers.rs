//! The durable watch set: one marker file per actively-watched key.
//!
//! A marker exists for a key iff a watch task for that key is active, or the
//! process crashed before the task could delete it. Markers are created by
//! the registration endpoint before a watch task starts and deleted by that
//! task after confirmed webhook delivery. On startup the whole set is listed
//! to resume watches that were in flight when the process last stopped.
//!
//! Each operation (create one file, delete one file, list the directory) is
//! an independent atomic unit; no cross-operation transaction exists or is
//! needed, because every watch task owns a disjoint key.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::JobKey;

use super::fsync::fsync_dir;

/// Directory used for markers in production, relative to the working
/// directory.
pub const DEFAULT_PENDING_DIR: &str = "pending";

/// Errors that can occur during marker operations.
#[derive(Debug, Error)]
pub enum PendingSetError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Job key that cannot be used as a marker filename.
    #[error("unsafe job key: {0:?}")]
    UnsafeKey(JobKey),
}

/// Result type for marker operations.
pub type Result<T> = std::result::Result<T, PendingSetError>;

/// Validates that a job key is safe to use as a marker filename.
///
/// A key is unsafe if it:
/// - Is empty
/// - Contains path separators (`/` or `\`) or null bytes
/// - Starts with a dot (hidden file, includes `.` and `..`)
pub fn validate_key(key: &JobKey) -> Result<()> {
    let k = key.as_str();

    if k.is_empty() {
        return Err(PendingSetError::UnsafeKey(key.clone()));
    }

    if k.contains('/') || k.contains('\\') || k.contains('\0') {
        return Err(PendingSetError::UnsafeKey(key.clone()));
    }

    if k.starts_with('.') {
        return Err(PendingSetError::UnsafeKey(key.clone()));
    }

    Ok(())
}

/// The set of keys currently being watched, backed by marker files.
#[derive(Debug, Clone)]
pub struct PendingSet {
    dir: PathBuf,
}

impl PendingSet {
    /// Creates a pending set rooted at the given directory.
    ///
    /// The directory itself is created lazily on the first `mark`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PendingSet { dir: dir.into() }
    }

    /// Returns the marker directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn marker_path(&self, key: &JobKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    /// Records that `key` is being watched.
    ///
    /// Creates the marker directory if absent, then an empty marker file,
    /// then fsyncs the directory so the marker survives a crash. Re-marking
    /// an already-marked key is a no-op.
    pub fn mark(&self, key: &JobKey) -> Result<()> {
        validate_key(key)?;

        std::fs::create_dir_all(&self.dir)?;

        let path = self.marker_path(key);
        if path.exists() {
            // Idempotent: the key is already recorded.
            debug!(key = %key, "marker already present");
            return Ok(());
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        // Empty file, no content to write
        drop(file);

        fsync_dir(&self.dir)?;

        Ok(())
    }

    /// Removes the marker for `key`.
    ///
    /// Returns `Ok(true)` if a marker was deleted, `Ok(false)` if no marker
    /// existed (a prior partial cleanup may already have removed it - the
    /// caller logs this but treats it as success).
    pub fn clear(&self, key: &JobKey) -> Result<bool> {
        validate_key(key)?;

        match std::fs::remove_file(self.marker_path(key)) {
            Ok(()) => {
                fsync_dir(&self.dir)?;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns all currently marked keys, sorted for deterministic order.
    ///
    /// A missing marker directory yields an empty set, not an error. Entries
    /// that are not plain marker files (subdirectories, hidden files,
    /// non-UTF-8 names) are skipped.
    pub fn list(&self) -> Result<Vec<JobKey>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();

        for entry in read_dir {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %entry.path().display(), "skipping non-UTF-8 marker name");
                continue;
            };

            let key = JobKey::new(name);
            if validate_key(&key).is_err() {
                // Not one of ours (e.g. an editor droppings file).
                debug!(key = %key, "skipping unexpected entry in marker directory");
                continue;
            }

            keys.push(key);
        }

        keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        Ok(keys)
    }
}
