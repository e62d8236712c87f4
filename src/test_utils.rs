//! Shared test fakes for driving watch tasks without a network.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::remote::{CompletionNotifier, DeliveryError, PollError, StatusPoller};
use crate::types::{JobKey, TaskInfo, TaskStatusCode};

/// Builds a config without touching the environment.
pub fn test_config(remote_url: &str, webhook_url: &str) -> Config {
    Config {
        port: 0,
        remote_url: remote_url.to_string(),
        webhook_url: webhook_url.to_string(),
        poll_interval: Duration::from_millis(1),
        request_timeout: Duration::from_secs(5),
    }
}

/// A status snapshot with the given code and empty identity fields.
pub fn status_with_code(code: i64) -> TaskInfo {
    TaskInfo {
        status: TaskStatusCode { code },
        ..TaskInfo::default()
    }
}

/// One scripted poll outcome.
#[derive(Debug, Clone)]
pub enum PollStep {
    Status(TaskInfo),
    Error,
}

/// A poller that replays a fixed script of outcomes.
///
/// Steps are consumed front to back; the final step repeats forever, so a
/// script ending in an incomplete status models a job that never finishes.
pub struct ScriptedPoller {
    steps: Mutex<VecDeque<PollStep>>,
    polls: Mutex<u32>,
}

impl ScriptedPoller {
    pub fn new(steps: impl IntoIterator<Item = PollStep>) -> Self {
        let steps: VecDeque<_> = steps.into_iter().collect();
        assert!(!steps.is_empty(), "poller script must not be empty");
        ScriptedPoller {
            steps: Mutex::new(steps),
            polls: Mutex::new(0),
        }
    }

    /// Number of poll attempts observed so far.
    pub fn poll_count(&self) -> u32 {
        *self.polls.lock().unwrap()
    }
}

#[async_trait]
impl StatusPoller for ScriptedPoller {
    async fn fetch_status(&self, _key: &JobKey) -> Result<TaskInfo, PollError> {
        *self.polls.lock().unwrap() += 1;

        let mut steps = self.steps.lock().unwrap();
        let step = if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().unwrap().clone()
        };

        match step {
            PollStep::Status(info) => Ok(info),
            PollStep::Error => Err(PollError::UnexpectedStatus(500)),
        }
    }
}

/// A notifier that records every delivery attempt and fails the first
/// `fail_first` of them.
pub struct CountingNotifier {
    fail_first: u32,
    attempts: Mutex<Vec<TaskInfo>>,
}

impl CountingNotifier {
    pub fn succeeding() -> Self {
        Self::failing_first(0)
    }

    pub fn failing_first(fail_first: u32) -> Self {
        CountingNotifier {
            fail_first,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// A notifier whose deliveries never succeed.
    pub fn never_succeeding() -> Self {
        Self::failing_first(u32::MAX)
    }

    /// The payloads of every delivery attempt, in order.
    pub fn attempts(&self) -> Vec<TaskInfo> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempts.lock().unwrap().len() as u32
    }
}

#[async_trait]
impl CompletionNotifier for CountingNotifier {
    async fn deliver(&self, status: &TaskInfo) -> Result<(), DeliveryError> {
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push(status.clone());

        if attempts.len() as u32 <= self.fail_first {
            Err(DeliveryError::UnexpectedStatus(503))
        } else {
            Ok(())
        }
    }
}
