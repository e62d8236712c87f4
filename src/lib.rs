//! Task Watch - a small service that watches externally-running asynchronous
//! jobs and notifies a downstream webhook when they complete.
//!
//! Jobs are identified by opaque keys. A key is registered over HTTP, after
//! which a dedicated watch task polls the remote job-info endpoint until the
//! job reports completion, then delivers the final status snapshot to the
//! configured webhook, retrying until delivery succeeds. Each watched key is
//! recorded as a marker file on disk so that watching resumes after a restart.

pub mod config;
pub mod pending;
pub mod remote;
pub mod server;
pub mod types;
pub mod watcher;

#[cfg(test)]
pub mod test_utils;
