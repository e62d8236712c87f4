//! Directory fsync for durable marker operations.
//!
//! Markers are empty files, so their durability is entirely a property of
//! the directory entry. On POSIX systems a created or deleted entry may not
//! survive a power loss unless the directory itself is fsynced.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Syncs a directory to disk, ensuring its entries are durable.
///
/// Without this, a freshly created marker might be lost on power loss, and
/// a deleted marker might reappear.
pub fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    // Open the directory as a file (read-only is sufficient for fsync)
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}
