//! HTTP server for job registration.
//!
//! # Endpoints
//!
//! - `/register/{key}` (any method) - record a key and start watching it;
//!   responds `"OK"`/200 or `"ERROR"`/500 on persistence failure
//! - `GET /health` - liveness probe

use std::sync::Arc;

pub mod health;
pub mod register;

pub use health::health_handler;
pub use register::register_handler;

use crate::watcher::WatchSupervisor;

/// Shared application state, passed to handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    supervisor: Arc<WatchSupervisor>,
}

impl AppState {
    pub fn new(supervisor: Arc<WatchSupervisor>) -> Self {
        AppState { supervisor }
    }

    /// Returns the watch supervisor.
    pub fn supervisor(&self) -> &WatchSupervisor {
        &self.supervisor
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{any, get};

    axum::Router::new()
        .route("/register/{key}", any(register_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
