//! Account Service - user account HTTP API
//!
//! Credential-gated account management over PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service::config::{LogFormat, StoreBackend};
use account_service::store::{AccountStore, DeadlineStore, MemoryAccountStore, PgAccountStore};
use account_service::{api, db, AccountService, Config};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(environment = %config.environment, "Starting account service");

    let (store, pool): (Arc<dyn AccountStore>, Option<PgPool>) = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; accounts are lost on shutdown");
            let store: Arc<dyn AccountStore> = Arc::new(DeadlineStore::new(
                MemoryAccountStore::new(),
                config.store_timeout,
            ));
            (store, None)
        }
        StoreBackend::Postgres => {
            let options = config
                .database
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;

            tracing::info!("Connecting to database...");
            let pool = db::connect_with(
                options,
                config.database_max_connections,
                config.database_min_connections,
            )
            .await?;

            if config.run_migrations {
                tracing::info!("Running migrations...");
                db::run_migrations(&pool).await?;
            }

            if !db::check_schema(&pool).await? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(anyhow::anyhow!("Database schema incomplete"));
            }
            tracing::info!("Database connected successfully");

            let store: Arc<dyn AccountStore> = Arc::new(DeadlineStore::new(
                PgAccountStore::new(pool.clone()),
                config.store_timeout,
            ));
            (store, Some(pool))
        }
    };

    let service = AccountService::new(store).with_redacted_errors(config.is_production());
    let app = api::build_app(service, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
