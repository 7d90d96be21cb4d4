use anyhow::{Context, Result};
use catalog::{
    abstract_trait::source::DynSourceClient,
    config::myconfig::{Config, StoreBackend},
    di::DependenciesInjectDeps,
    handler::AppRouter,
    repository::memory::MemoryProductStore,
    source::contentful::ContentfulClient,
    state::AppState,
    sync::SyncScheduler,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger, shutdown_signal},
};
use std::sync::Arc;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state, telemetry) = setup().await.context("Failed to setup application")?;

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let scheduler = SyncScheduler::new(state.di_container.sync.clone(), config.sync.interval);
    let scheduler_handle = scheduler.spawn(shutdown_tx.subscribe());

    shutdown_listener(shutdown_tx.clone());

    let server_result = AppRouter::serve(config.port, state, shutdown_tx.subscribe()).await;
    if let Err(e) = &server_result {
        error!("❌ HTTP server error: {e:?}");
        let _ = shutdown_tx.send(());
    }

    shutdown(telemetry, scheduler_handle).await;

    server_result
}

async fn setup() -> Result<(Config, AppState, Option<Telemetry>)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init("catalog-service", endpoint)
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    init_logger(
        telemetry.as_ref().map(|t| t.logger_provider()),
        "catalog-service",
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Catalog Service initialization...");

    let source = Arc::new(
        ContentfulClient::new(&config.contentful).context("Failed to build Contentful client")?,
    ) as DynSourceClient;

    let deps = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("Missing environment variable: DATABASE_URL")?;

            let db_pool =
                ConnectionManager::new_pool(database_url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&db_pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            DependenciesInjectDeps::postgres(db_pool, source, config.sync.page_size)
        }
        StoreBackend::Memory => {
            warn!("⚠️ Using in-memory store, data is lost on restart");
            DependenciesInjectDeps::memory(
                Arc::new(MemoryProductStore::new()),
                source,
                config.sync.page_size,
            )
        }
    };

    let state = AppState::new(deps);

    info!("✅ Application setup completed successfully.");
    Ok((config, state, telemetry))
}

fn shutdown_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("🛑 Shutdown signal detected, broadcasting shutdown...");
        if let Err(e) = shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal: {}", e);
        }
    });
}

async fn shutdown(telemetry: Option<Telemetry>, scheduler_handle: JoinHandle<()>) {
    info!("🛑 Shutting down sync scheduler...");

    let shutdown_timeout = tokio::time::Duration::from_secs(30);
    match tokio::time::timeout(shutdown_timeout, scheduler_handle).await {
        Ok(Ok(())) => info!("✅ Sync scheduler stopped gracefully"),
        Ok(Err(e)) => error!("💀 Sync scheduler task failed: {e}"),
        Err(_) => warn!("⚠️  Shutdown timeout reached, forcing exit"),
    }

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {}", e);
        }
    }

    info!("✅ Catalog Service shutdown complete.");
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
