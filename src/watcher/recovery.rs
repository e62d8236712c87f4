//! Startup recovery of watches that were in flight at the last shutdown.
//!
//! Every registered key leaves a marker on disk until its completion
//! webhook has been delivered. Listing those markers at startup and
//! re-spawning a watch task for each gives at-least-once continuation
//! across restarts: a job whose notification succeeded but whose marker
//! deletion did not will be watched (and notified) a second time.

use tracing::{error, info};

use super::supervisor::WatchSupervisor;

/// Spawns a watch task for every marker in the durable watch set.
///
/// Called once at startup, before the server starts accepting new
/// registrations. The markers already exist, so nothing is re-marked. A
/// listing failure is logged and yields zero resumed watches; the markers
/// stay on disk for the next restart.
///
/// Returns the number of watches resumed.
pub async fn resume_pending_watches(supervisor: &WatchSupervisor) -> usize {
    let keys = match supervisor.pending().list() {
        Ok(keys) => keys,
        Err(e) => {
            error!(error = %e, "failed to list pending markers; resuming nothing");
            return 0;
        }
    };

    let count = keys.len();
    for key in keys {
        info!(key = %key, "resuming watch for pending job");
        supervisor.spawn_watch(key).await;
    }

    count
}
