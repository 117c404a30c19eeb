//! Response caching middleware.
//!
//! `cache_responses` serves repeated `GET` requests from the shared cache and
//! stores fresh JSON responses; `invalidate_tags` drops cached entries when a
//! write succeeds. Both take a [`CacheLayerState`] so each route group can
//! carry its own TTL and tags:
//!
//! ```ignore
//! let donations = CacheLayerState::new(cache.clone(), CachePolicy::new().with_tag("donations"));
//! Router::new()
//!     .route("/api/donations", get(list).post(create))
//!     .layer(from_fn_with_state(donations.clone(), cache_responses))
//!     .layer(from_fn_with_state(donations, invalidate_tags));
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::fingerprint::request_key;
use crate::cache::SetOptions;
use crate::error::CacheError;
use crate::service::SharedCache;

/// Header reporting whether the response came from the cache.
pub const X_CACHE: &str = "x-cache";

/// Default largest body the middleware buffers (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

// == Cache Policy ==
/// Per-route caching rules.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    /// TTL for stored responses (None = cache default)
    pub ttl: Option<Duration>,
    /// Tags attached on store and invalidated on successful writes
    pub tags: Vec<String>,
    /// Responses without a known size at or under this limit are not cached
    pub max_body_bytes: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: None,
            tags: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl CachePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    fn set_options(&self) -> SetOptions {
        let options = SetOptions::new().with_tags(self.tags.iter().cloned());
        match self.ttl {
            Some(ttl) => options.with_ttl(ttl),
            None => options,
        }
    }
}

/// Caller identity verified by an upstream authentication layer.
///
/// Insert it as a request extension once the caller is authenticated. When
/// present, cached responses are keyed by it; otherwise by the
/// `Authorization` credential. Client-supplied identity headers are never
/// trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor(pub String);

/// State handed to the middleware functions.
#[derive(Clone)]
pub struct CacheLayerState {
    pub cache: SharedCache,
    pub policy: Arc<CachePolicy>,
}

impl CacheLayerState {
    pub fn new(cache: SharedCache, policy: CachePolicy) -> Self {
        Self {
            cache,
            policy: Arc::new(policy),
        }
    }
}

/// Serves cached `GET` responses and stores fresh `200` JSON responses.
///
/// - Hit: replays the payload with `X-Cache: HIT`, or answers
///   `304 Not Modified` when `If-None-Match` carries the current ETag.
/// - Miss: runs the handler, stores the body when cacheable, and marks the
///   response `X-Cache: MISS`.
/// - `Cache-Control: no-cache`/`no-store` on the request skips the lookup
///   but still refreshes the stored copy.
pub async fn cache_responses(
    State(layer): State<CacheLayerState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(&request);

    if !wants_fresh(request.headers()) {
        let hit = {
            let mut cache = layer.cache.write().await;
            cache.get_entry(&key).map(|entry| {
                (
                    entry.payload.clone(),
                    etag_for(&entry.fingerprint),
                    entry.ttl_remaining_secs(),
                )
            })
        };

        if let Some((payload, etag, max_age)) = hit {
            debug!("Cache hit for '{}'", key);
            if matches_etag(request.headers(), &etag) {
                let mut response = StatusCode::NOT_MODIFIED.into_response();
                decorate(response.headers_mut(), &etag, max_age, "HIT");
                return response;
            }
            return replay(&payload, &etag, max_age);
        }
    }

    let response = next.run(request).await;
    store_response(&layer, key, response).await
}

/// Invalidates the policy's tags after a successful mutating request.
pub async fn invalidate_tags(
    State(layer): State<CacheLayerState>,
    request: Request,
    next: Next,
) -> Response {
    let mutating = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE]
        .contains(request.method());

    let response = next.run(request).await;

    if mutating && response.status().is_success() && !layer.policy.tags.is_empty() {
        let mut cache = layer.cache.write().await;
        let removed: usize = layer
            .policy
            .tags
            .iter()
            .map(|tag| cache.invalidate_by_tag(tag))
            .sum();
        debug!(
            "Write invalidated {} cached entries for tags {:?}",
            removed, layer.policy.tags
        );
    }

    response
}

/// Derives the cache key from method, path with query, and caller identity.
pub fn cache_key(request: &Request) -> String {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    request_key(
        request.method().as_str(),
        path_and_query,
        actor(request).as_deref(),
    )
}

fn actor(request: &Request) -> Option<String> {
    if let Some(AuthenticatedActor(id)) = request.extensions().get::<AuthenticatedActor>() {
        return Some(format!("user:{}", id));
    }
    request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|credential| {
            format!(
                "credential:{}",
                String::from_utf8_lossy(credential.as_bytes())
            )
        })
}

fn wants_fresh(headers: &HeaderMap) -> bool {
    headers
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("no-cache") || v.contains("no-store"))
}

fn etag_for(fingerprint: &str) -> String {
    format!("\"{}\"", fingerprint)
}

fn matches_etag(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(',')
                .map(str::trim)
                .any(|candidate| candidate == etag || candidate == "*")
        })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json") || v.contains("+json"))
}

fn decorate(headers: &mut HeaderMap, etag: &str, max_age: u64, outcome: &'static str) {
    headers.insert(X_CACHE, HeaderValue::from_static(outcome));
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("private, max-age={}", max_age)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
}

fn replay(payload: &Value, etag: &str, max_age: u64) -> Response {
    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(err) => {
            return CacheError::Internal(format!("Cached payload unreadable: {}", err))
                .into_response()
        }
    };

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response();
    decorate(response.headers_mut(), etag, max_age, "HIT");
    response
}

async fn store_response(layer: &CacheLayerState, key: String, response: Response) -> Response {
    if response.status() != StatusCode::OK || !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    // Unknown or oversized bodies stream through untouched
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= layer.policy.max_body_bytes as u64);
    if !fits {
        debug!("Response for '{}' too large or unsized, not cached", key);
        return Response::from_parts(parts, body);
    }

    let bytes = match to_bytes(body, layer.policy.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to buffer response for '{}': {}", key, err);
            return CacheError::Internal("Response body could not be read".to_string())
                .into_response();
        }
    };

    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    // Hits replay the re-serialized payload, so misses send the same bytes
    let body = match serde_json::to_vec(&payload) {
        Ok(body) => body,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };
    parts.headers.remove(header::CONTENT_LENGTH);

    let stored = {
        let mut cache = layer.cache.write().await;
        cache.set(key.clone(), payload, layer.policy.set_options());
        cache
            .peek(&key)
            .map(|entry| (etag_for(&entry.fingerprint), entry.ttl_remaining_secs()))
    };

    if let Some((etag, max_age)) = stored {
        debug!("Cached response for '{}'", key);
        decorate(&mut parts.headers, &etag, max_age, "MISS");
    }

    Response::from_parts(parts, Body::from(body))
}
