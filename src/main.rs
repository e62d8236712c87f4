use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_watch::config::Config;
use task_watch::pending::{DEFAULT_PENDING_DIR, PendingSet};
use task_watch::remote::{HttpNotifier, HttpPoller};
use task_watch::server::{AppState, build_router};
use task_watch::watcher::{WatchSupervisor, resume_pending_watches};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_watch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "refusing to start");
            std::process::exit(1);
        }
    };

    let client = match reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let pending = PendingSet::new(DEFAULT_PENDING_DIR);
    let poller = Arc::new(HttpPoller::new(client.clone(), &config));
    let notifier = Arc::new(HttpNotifier::new(client, &config));
    let supervisor = Arc::new(WatchSupervisor::new(
        pending,
        poller,
        notifier,
        config.poll_interval,
    ));

    // Re-adopt watches that were in flight when the process last stopped,
    // before accepting any new registrations.
    let resumed = resume_pending_watches(&supervisor).await;
    info!(resumed, "resumed pending watches");

    let app = build_router(AppState::new(supervisor));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
