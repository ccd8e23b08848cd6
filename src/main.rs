// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::notifications::MemoryNotifier;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::http_repository::HttpDashboardRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_console_config()?;

    // Backend access (infrastructure layer)
    let repository = Arc::new(HttpDashboardRepository::new(
        config.backend.url.clone(),
        config.backend.token.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    // Dashboard lifecycle (application layer)
    let notifications = Arc::new(MemoryNotifier::new());
    let dashboard_service = DashboardService::new(
        repository,
        notifications.clone(),
        config.backend.dashboards_url(),
    );

    if let Err(e) = dashboard_service.fetch_all().await {
        tracing::warn!("Initial dashboard load failed: {}", e);
    }

    let state = Arc::new(AppState {
        dashboard_service,
        notifications,
    });
    let router = build_router(state);

    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!("Starting dashboard-console on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
