//! Registration endpoint handler.
//!
//! Accepts a job key, records it in the durable watch set, and launches an
//! independent watch task before responding. Registration never waits for
//! the watch itself: the response only acknowledges that the key is durably
//! marked and a task has been started.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, warn};

use crate::pending::PendingSetError;
use crate::types::JobKey;

use super::AppState;

/// Errors that can occur when registering a key.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The key could not be recorded in the durable watch set.
    #[error("pending set error: {0}")]
    Pending(#[from] PendingSetError),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let status = match &self {
            // A key we refuse to turn into a filename is the caller's fault.
            RegisterError::Pending(PendingSetError::UnsafeKey(_)) => StatusCode::BAD_REQUEST,
            RegisterError::Pending(PendingSetError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, "ERROR").into_response()
    }
}

/// Registration handler.
///
/// Accepts any HTTP method on `/register/{key}`.
///
/// # Response
///
/// - 200 `"OK"`: key durably marked, watch task started
/// - 400 `"ERROR"`: key is not filesystem-safe; nothing was recorded
/// - 500 `"ERROR"`: the marker could not be persisted; no watch task started
///
/// Re-registering a key that is already watched is accepted and starts a
/// second independent watch task (see [`crate::watcher::supervisor`]).
pub async fn register_handler(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<(StatusCode, &'static str), RegisterError> {
    let key = JobKey::new(key);
    debug!(key = %key, "registering job key");

    if let Err(e) = app_state.supervisor().pending().mark(&key) {
        warn!(key = %key, error = %e, "failed to record key in the watch set");
        return Err(e.into());
    }

    // Fire off the watch; the handle is retained by the supervisor.
    app_state.supervisor().spawn_watch(key).await;

    Ok((StatusCode::OK, "OK"))
}
