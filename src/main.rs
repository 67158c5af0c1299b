//! Product Cache - product CRUD over PostgreSQL with a read-through cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::create_router;
use product_cache::cache::{Cache, MemoryCache, RedisCache};
use product_cache::store::{MemoryProductStore, PgProductStore, ProductStore};
use product_cache::{spawn_cleanup_task, stop_cleanup_task, AppState, Config};

/// Main entry point for the product service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the relational store (PostgreSQL, or in-memory when unset)
/// 4. Connect the cache (Redis, or in-memory with a sweep task)
/// 5. Serve the Axum router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, postgres={}, redis={}",
        config.server_port,
        config.database_url.is_some(),
        config.redis_url.is_some()
    );

    let store = connect_store(&config).await?;
    let (cache, cleanup_handle) = connect_cache(&config).await;

    let app = create_router(AppState::from_adapters(store, cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// PostgreSQL when configured; failing to reach it is fatal.
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PgProductStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to PostgreSQL")?;
            info!("Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory product store");
            Ok(Arc::new(MemoryProductStore::new()))
        }
    }
}

/// Redis when configured and reachable, otherwise the in-process cache.
async fn connect_cache(config: &Config) -> (Arc<dyn Cache>, Option<JoinHandle<()>>) {
    if let Some(url) = &config.redis_url {
        match RedisCache::connect(url).await {
            Ok(cache) => return (Arc::new(cache), None),
            Err(e) => warn!(error = %e, "Failed to connect to Redis, using in-memory cache"),
        }
    }

    let cache = MemoryCache::new(config.max_cache_entries);
    let handle = spawn_cleanup_task(&cache, config.cleanup_interval);
    info!("In-memory cache initialized");
    (Arc::new(cache), Some(handle))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        stop_cleanup_task(handle);
    }
}
