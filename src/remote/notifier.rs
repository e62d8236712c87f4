//! Completion delivery to the downstream webhook.
//!
//! The payload is the final status snapshot re-serialized as JSON. Because
//! the snapshot always originates from successfully-parsed JSON,
//! serialization cannot fail here; transport failures are transient and
//! retried by the watch task with the identical payload.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::types::TaskInfo;

/// Errors from a single delivery attempt. Transient; the watch task retries
/// forever on a fixed interval.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request could not be sent or timed out.
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status code.
    #[error("webhook returned HTTP {0}")]
    UnexpectedStatus(u16),
}

/// One delivery of a completion payload to the downstream consumer.
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    /// POSTs the completed status snapshot to the webhook.
    async fn deliver(&self, status: &TaskInfo) -> Result<(), DeliveryError>;
}

/// HTTP implementation of [`CompletionNotifier`].
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl HttpNotifier {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        HttpNotifier {
            client,
            webhook_url: config.webhook_url.clone(),
        }
    }
}

#[async_trait]
impl CompletionNotifier for HttpNotifier {
    async fn deliver(&self, status: &TaskInfo) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.webhook_url).json(status).send().await?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(DeliveryError::UnexpectedStatus(http_status.as_u16()));
        }

        Ok(())
    }
}
