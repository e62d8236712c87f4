//! Status polling against the remote job system.
//!
//! One poll is one GET against the configured job-info URL template. Every
//! failure here is transient by definition: the watch task retries forever
//! on a fixed interval, so this module never retries internally and never
//! escalates.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::types::{JobKey, TaskInfo};

/// Errors from a single status check. All variants are transient; the
/// caller's only recourse is to wait and poll again.
#[derive(Debug, Error)]
pub enum PollError {
    /// The request could not be sent, timed out, or the body did not parse
    /// as a status document.
    #[error("status request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("status endpoint returned HTTP {0}")]
    UnexpectedStatus(u16),
}

/// One status check against the remote job system.
#[async_trait]
pub trait StatusPoller: Send + Sync {
    /// Fetches the current status snapshot for `key`.
    async fn fetch_status(&self, key: &JobKey) -> Result<TaskInfo, PollError>;
}

/// HTTP implementation of [`StatusPoller`].
///
/// The shared client carries the configured request timeout, bounding how
/// long a single poll can stall.
#[derive(Clone)]
pub struct HttpPoller {
    client: reqwest::Client,
    config: Config,
}

impl HttpPoller {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        HttpPoller {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl StatusPoller for HttpPoller {
    async fn fetch_status(&self, key: &JobKey) -> Result<TaskInfo, PollError> {
        let url = self.config.status_url(key);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::UnexpectedStatus(status.as_u16()));
        }

        let info = response.json::<TaskInfo>().await?;
        Ok(info)
    }
}
