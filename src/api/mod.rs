//! API Module
//!
//! HTTP handlers and routing for the product REST API.
//!
//! # Endpoints
//! - `GET /products` - List products
//! - `POST /products` - Create a product
//! - `GET|PUT|DELETE /products/:id` - Read, update, delete one product
//! - `GET /stats` - Cache metrics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiJson, ApiPath};
pub use handlers::*;
pub use routes::create_router;
