//! Palladio REST server.
//!
//! Configuration is read from the environment:
//!
//! ```text
//! PALLADIO_DATABASE_URL    PostgreSQL connection string (unset: in-memory)
//! PALLADIO_BIND_ADDR       listen address (default 0.0.0.0:8080)
//! PALLADIO_DB_POOL_SIZE    pooled connections (default 10)
//! PALLADIO_RUN_MIGRATIONS  apply embedded migrations at startup (default true)
//! RUST_LOG                 log filter (default info,palladio=debug)
//! ```

use palladio::api::{AppState, build_router};
use palladio::config::{ConfigError, ServerConfig, StorageConfig};
use palladio::db::{self, DatabaseSetupError};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,palladio=debug";

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseSetupError),
    #[error("database setup task failed: {0}")]
    SetupTask(#[from] tokio::task::JoinError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = build_state(config.storage).await?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    tracing::info!(addr = %config.bind_addr, "palladio listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("palladio stopped");
    Ok(())
}

async fn build_state(storage: StorageConfig) -> Result<AppState, ServerError> {
    match storage {
        StorageConfig::InMemory => {
            tracing::warn!("no database configured; records are kept in memory only");
            Ok(AppState::in_memory())
        }
        StorageConfig::Postgres {
            database_url,
            pool_size,
            run_migrations,
        } => {
            let pool = tokio::task::spawn_blocking(move || {
                let connected = db::build_pool(&database_url, pool_size)?;
                if run_migrations {
                    db::migrate_pool(&connected)?;
                }
                Ok::<_, DatabaseSetupError>(connected)
            })
            .await??;
            tracing::info!(pool_size, run_migrations, "connected to database");
            Ok(AppState::postgres(&pool))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
