mod cli;

use std::sync::Arc;

use anyhow::Context;
use bookmarks_core::Repository;
use bookmarks_gateway::{App, AppState};
use bookmarks_storage::fixtures::sample_bookmarks;
use bookmarks_storage::{InMemoryRepository, PostgresRepository};
use bookmarks_telemetry::TelemetryConfig;
use clap::Parser;
use tracing::{error, info, warn};

use crate::cli::{StorageBackendArg, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CLI::try_parse()?;

    let _telemetry = bookmarks_telemetry::init(
        TelemetryConfig::builder()
            .service_name("bookmarks-gateway")
            .log_format(config.log_format.into())
            .otlp_endpoint(config.otlp_endpoint.clone())
            .build(),
    )?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        base_path = %config.base_path,
        "starting bookmarks gateway"
    );

    let repository = build_repository(&config).await?;

    if config.api_token.is_none() {
        warn!("no API token configured, bookmark routes are unauthenticated");
    }

    let state = AppState::new(repository)
        .with_base_path(&config.base_path)
        .with_api_token(config.api_token);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn build_repository(config: &CLI) -> anyhow::Result<Arc<dyn Repository>> {
    match config.storage {
        StorageBackendArg::InMemory => {
            let repository = if config.seed_sample_data {
                InMemoryRepository::with_bookmarks(sample_bookmarks())
            } else {
                InMemoryRepository::new()
            };
            info!(bookmarks = repository.len(), "using in-memory storage");
            Ok(Arc::new(repository))
        }
        StorageBackendArg::Postgres => {
            let dsn = config
                .postgres_dsn
                .as_deref()
                .context("postgres dsn is required when storage backend is postgres")?;
            let repository =
                PostgresRepository::connect(dsn, config.postgres_max_connections).await?;

            if config.run_migrations {
                repository.run_migrations().await?;
                info!("database migrations applied");
            }
            if config.seed_sample_data {
                warn!("sample data is only loaded into in-memory storage, ignoring");
            }

            Ok(Arc::new(repository))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("ctrl+c signal received, shutting down");
}
