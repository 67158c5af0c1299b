//! Product Cache - product CRUD over PostgreSQL with a read-through cache
//!
//! Reads are served from Redis (or an in-process TTL cache) and fall back
//! to the store on a miss; writes invalidate the cached copy.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use repository::ProductRepository;
pub use tasks::{spawn_cleanup_task, stop_cleanup_task};
