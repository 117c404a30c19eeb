//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is alive.
//!
//! # Tasks
//! - Expiry sweep: removes expired entries that are never read again

mod sweep;

pub use sweep::{spawn_sweep_task, MIN_SWEEP_INTERVAL};
