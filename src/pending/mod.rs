//! Durable tracking of which job keys are being watched.
//!
//! Backed by one zero-byte marker file per key in a well-known directory.
//! See [`markers`] for the invariants and [`fsync`] for why directory fsyncs
//! are required.

mod fsync;
mod markers;

pub use markers::{DEFAULT_PENDING_DIR, PendingSet, PendingSetError, Result, validate_key};
