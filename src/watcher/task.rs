//! The per-key watch task.
//!
//! One task owns the whole lifecycle of one registered key:
//!
//! ```text
//! POLLING ──(status code > threshold)──► NOTIFYING ──(delivery accepted)──► DONE
//!    ▲ │                                    ▲ │
//!    └─┘ poll error / not complete:         └─┘ delivery error:
//!        wait one interval, poll again          wait one interval, resend
//! ```
//!
//! There is no failed state: every transient error loops back into the same
//! state after a fixed delay, with no upper bound on attempts. Nothing
//! propagates out of the task except logs. Once the final snapshot has been
//! delivered, the task makes a single attempt to remove its marker and
//! terminates; a failed removal is logged and left for the next restart to
//! re-adopt (the job will be re-watched and re-notified, an accepted
//! at-least-once consequence).
//!
//! Within one task, polls are strictly sequential, and delivery is only
//! attempted after a poll has observed completion. The delivered payload is
//! the completed snapshot captured in memory; it is never re-polled or
//! re-parsed between retries.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::pending::PendingSet;
use crate::remote::{CompletionNotifier, StatusPoller};
use crate::types::{JobKey, TaskInfo};

/// The state machine watching a single job key.
pub struct WatchTask {
    key: JobKey,
    pending: PendingSet,
    poller: Arc<dyn StatusPoller>,
    notifier: Arc<dyn CompletionNotifier>,
    poll_interval: Duration,
}

impl WatchTask {
    pub fn new(
        key: JobKey,
        pending: PendingSet,
        poller: Arc<dyn StatusPoller>,
        notifier: Arc<dyn CompletionNotifier>,
        poll_interval: Duration,
    ) -> Self {
        WatchTask {
            key,
            pending,
            poller,
            notifier,
            poll_interval,
        }
    }

    /// Drives the task to completion. Never returns early; runs until the
    /// completion payload has been delivered or the process dies.
    pub async fn run(self) {
        let status = self.poll_until_complete().await;
        self.deliver_until_accepted(&status).await;
        self.remove_marker();

        info!(key = %self.key, "done watching job");
    }

    /// Polls on the fixed interval until the job reports completion,
    /// absorbing every transient failure.
    async fn poll_until_complete(&self) -> TaskInfo {
        loop {
            sleep(self.poll_interval).await;

            match self.poller.fetch_status(&self.key).await {
                Ok(status) if status.is_complete() => {
                    info!(
                        key = %self.key,
                        code = status.status.code,
                        "job completed"
                    );
                    return status;
                }
                Ok(status) => {
                    debug!(
                        key = %self.key,
                        code = status.status.code,
                        "job not complete yet"
                    );
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "error polling job status");
                }
            }
        }
    }

    /// Re-sends the identical completion payload until the webhook accepts
    /// it.
    async fn deliver_until_accepted(&self, status: &TaskInfo) {
        loop {
            match self.notifier.deliver(status).await {
                Ok(()) => {
                    info!(key = %self.key, "completion webhook delivered");
                    return;
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "unable to send completion webhook");
                }
            }

            sleep(self.poll_interval).await;
        }
    }

    /// One marker-removal attempt. Failure is logged, never retried: a stray
    /// marker is re-adopted on the next restart.
    fn remove_marker(&self) {
        match self.pending.clear(&self.key) {
            Ok(true) => debug!(key = %self.key, "removed pending marker"),
            Ok(false) => warn!(key = %self.key, "pending marker was already absent"),
            Err(e) => warn!(key = %self.key, error = %e, "failed to remove pending marker"),
        }
    }
}
