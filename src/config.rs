//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; `None` runs on the in-memory store
    pub database_url: Option<String>,
    /// Maximum pooled PostgreSQL connections
    pub db_max_connections: u32,
    /// Redis connection URL; `None` runs on the in-memory cache
    pub redis_url: Option<String>,
    /// HTTP server port
    pub server_port: u16,
    /// Capacity of the in-memory cache
    pub max_cache_entries: usize,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` (or `DB_URL`) - PostgreSQL URL (default: unset)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 20)
    /// - `REDIS_URL` - Redis URL (default: unset); when unset and `REDIS_HOST`
    ///   is set, built from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASS`, `REDIS_DB`
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `MAX_CACHE_ENTRIES` - In-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: non_empty_var("DATABASE_URL").or_else(|| non_empty_var("DB_URL")),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            redis_url: non_empty_var("REDIS_URL").or_else(redis_url_from_parts),
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            max_cache_entries: parsed_var("MAX_CACHE_ENTRIES")
                .unwrap_or(defaults.max_cache_entries),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 20,
            redis_url: None,
            server_port: 8000,
            max_cache_entries: 10_000,
            cleanup_interval: 1,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn redis_url_from_parts() -> Option<String> {
    let host = non_empty_var("REDIS_HOST")?;
    let port: u16 = parsed_var("REDIS_PORT").unwrap_or(6379);
    let db: i64 = parsed_var("REDIS_DB").unwrap_or(0);
    Some(build_redis_url(
        &host,
        port,
        non_empty_var("REDIS_PASS").as_deref(),
        db,
    ))
}

/// Formats `redis://[:password@]host:port/db`, percent-encoding the password.
pub fn build_redis_url(host: &str, port: u16, password: Option<&str>, db: i64) -> String {
    match password {
        Some(pass) => format!(
            "redis://:{}@{}:{}/{}",
            urlencoding::encode(pass),
            host,
            port,
            db
        ),
        None => format!("redis://{}:{}/{}", host, port, db),
    }
}
