//! Fingerprint Module
//!
//! Content hashes for payload validation (ETag) and request cache keys.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::warn;

/// Actor component used when a request carries no identity.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

// == Payload Fingerprint ==
/// Computes the hex SHA-256 of the payload's JSON serialization.
///
/// Only used for cache-validation headers. A payload that fails to
/// serialize hashes as empty input so that `set` never fails.
pub fn payload_fingerprint<V: Serialize>(payload: &V) -> String {
    let bytes = serde_json::to_vec(payload).unwrap_or_else(|err| {
        warn!("Payload fingerprint fell back to empty input: {}", err);
        Vec::new()
    });
    hex::encode(Sha256::digest(&bytes))
}

// == Request Key ==
/// Builds the cache key for a request.
///
/// Format: `{METHOD}:{path_and_query}:{actor}`, where `actor` is
/// [`ANONYMOUS_ACTOR`] or the [`actor_digest`] of `identity`. Neither the
/// method nor the actor can contain `:`, so distinct requests never share a
/// key even when the path does.
pub fn request_key(method: &str, path_and_query: &str, identity: Option<&str>) -> String {
    let actor = match identity {
        Some(identity) => actor_digest(identity),
        None => ANONYMOUS_ACTOR.to_string(),
    };
    format!("{}:{}:{}", method, path_and_query, actor)
}

/// Hashes a caller identity so raw tokens never end up inside cache keys.
pub fn actor_digest(identity: &str) -> String {
    format!("actor-{}", hex::encode(Sha256::digest(identity.as_bytes())))
}
