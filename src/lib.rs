//! Response Cache - in-memory HTTP response cache
//!
//! TTL expiry, tag-based bulk invalidation, FIFO eviction and a periodic
//! expiry sweep, plus axum middleware and an admin API around it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use cache::{ResponseCache, SetOptions};
pub use config::Config;
pub use service::{CacheService, SharedCache};
pub use tasks::spawn_sweep_task;
