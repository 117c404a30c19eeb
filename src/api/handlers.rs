//! API Handlers
//!
//! HTTP request handlers for each cache admin endpoint.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::SetOptions;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateResponse, SetRequest,
    SetResponse, StatsResponse,
};
use crate::service::SharedCache;

/// Application state shared across all handlers.
///
/// Holds the shared cache handle obtained from [`crate::service::CacheService`].
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around a shared cache handle.
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }
}

/// Handler for PUT /set
///
/// Stores a payload in the cache with optional TTL and tags.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut options = SetOptions::new().with_tags(req.tags);
    if let Some(ttl) = req.ttl {
        options = options.with_ttl(Duration::from_secs(ttl));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.payload, options);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a payload and its fingerprint by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: lookups update stats and may drop an expired entry
    let mut cache = state.cache.write().await;
    let entry = cache
        .get_entry(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse {
        payload: entry.payload.clone(),
        fingerprint: entry.fingerprint.clone(),
        ttl_remaining: entry.ttl_remaining_secs(),
        key,
    }))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /invalidate/:tag
///
/// Removes every entry linked to the tag. Unknown tags remove nothing.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.write().await.invalidate_by_tag(&tag);
    info!("Tag '{}' invalidated, {} entries removed", tag, removed);

    Json(InvalidateResponse { tag, removed })
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.write().await.clear();
    info!("Cache cleared, {} entries removed", removed);

    Json(ClearResponse::new(removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
