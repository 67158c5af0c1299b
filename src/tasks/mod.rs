//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: purges expired in-process cache entries on a fixed period

mod cleanup;

pub use cleanup::{spawn_cleanup_task, stop_cleanup_task};
