//! Supervisor for spawned watch tasks.
//!
//! Both the registration endpoint and startup recovery spawn watch tasks
//! through the supervisor, which records a join handle per spawn keyed by
//! job key. The registry exists for introspection only: tasks are never
//! cancelled or joined, they run until done.
//!
//! # Duplicate watches
//!
//! Registering a key that is already being watched deliberately starts a
//! second, fully independent watch task for the same key. Both tasks poll
//! and (eventually) notify; the downstream consumer sees at-least-once
//! delivery. The registry keeps every handle, so the duplicate policy is
//! observable rather than an accident of unmanaged spawning.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use crate::pending::PendingSet;
use crate::remote::{CompletionNotifier, StatusPoller};
use crate::types::JobKey;

use super::task::WatchTask;

/// Spawns watch tasks and records their handles.
pub struct WatchSupervisor {
    pending: PendingSet,
    poller: Arc<dyn StatusPoller>,
    notifier: Arc<dyn CompletionNotifier>,
    poll_interval: Duration,

    /// Handles of every spawned watch task, keyed by job key. A key maps to
    /// more than one handle when it was registered more than once.
    watchers: Mutex<HashMap<JobKey, Vec<JoinHandle<()>>>>,
}

impl WatchSupervisor {
    pub fn new(
        pending: PendingSet,
        poller: Arc<dyn StatusPoller>,
        notifier: Arc<dyn CompletionNotifier>,
        poll_interval: Duration,
    ) -> Self {
        WatchSupervisor {
            pending,
            poller,
            notifier,
            poll_interval,
            watchers: Mutex::new(HashMap::new()),
        }
    }

    /// The durable watch set backing this supervisor.
    pub fn pending(&self) -> &PendingSet {
        &self.pending
    }

    /// Spawns an independent watch task for `key` and records its handle.
    ///
    /// The caller is responsible for having created the key's marker first
    /// (registration) or for knowing it already exists (recovery).
    pub async fn spawn_watch(&self, key: JobKey) {
        info!(key = %key, "starting watch task");

        let task = WatchTask::new(
            key.clone(),
            self.pending.clone(),
            Arc::clone(&self.poller),
            Arc::clone(&self.notifier),
            self.poll_interval,
        );

        let handle = tokio::spawn(task.run());

        let mut watchers = self.watchers.lock().await;
        watchers.entry(key).or_default().push(handle);
    }

    /// Number of watch tasks that are still running.
    pub async fn active_watch_count(&self) -> usize {
        let watchers = self.watchers.lock().await;
        watchers
            .values()
            .flatten()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Number of still-running watch tasks for one key.
    pub async fn active_watches_for(&self, key: &JobKey) -> usize {
        let watchers = self.watchers.lock().await;
        watchers
            .get(key)
            .map(|handles| handles.iter().filter(|h| !h.is_finished()).count())
            .unwrap_or(0)
    }
}
