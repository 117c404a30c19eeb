//! API Module
//!
//! HTTP handlers, routing and caching middleware.
//!
//! # Endpoints
//! - `PUT /set` - Store a payload with optional TTL and tags
//! - `GET /get/:key` - Retrieve a payload and its fingerprint
//! - `DELETE /del/:key` - Delete a key
//! - `POST /invalidate/:tag` - Remove every entry carrying a tag
//! - `POST /clear` - Remove everything
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{
    cache_responses, invalidate_tags, AuthenticatedActor, CacheLayerState, CachePolicy,
};
pub use routes::create_router;
