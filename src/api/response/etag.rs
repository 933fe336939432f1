//! Weak entity tags and request freshness checks.

use axum::http::HeaderMap;
use axum::http::header::{CACHE_CONTROL, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

/// Cache policy sent with every tagged response (max-age = 2 weeks).
pub const ETAG_CACHE_CONTROL: &str = "max-age=1209600, private, no-cache";

/// Computes a weak validator (`W/"<hex sha1>"`) over the exact response bytes.
pub fn weak_etag(body: &[u8]) -> String {
    format!("W/\"{}\"", hex::encode(Sha1::digest(body)))
}

/// Serializes a JSON value with object keys sorted at every level, so equal
/// values always hash to the same tag.
pub fn canonical_json(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&sorted(value))
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut out = Map::new();
            for (key, inner) in entries {
                out.insert(key.clone(), sorted(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Reports whether the client's cached copy is still fresh.
///
/// Fresh means the request is conditional, does not ask to bypass caches with
/// `Cache-Control: no-cache`, and its `If-None-Match` list names the
/// response's tag (weak comparison) or is `*`. Responses never carry
/// `Last-Modified`, so `If-Modified-Since` on its own never makes a copy fresh.
pub fn is_fresh(request: &HeaderMap, response: &HeaderMap) -> bool {
    let none_match = request.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok());
    let modified_since = request.get(IF_MODIFIED_SINCE);

    if none_match.is_none() && modified_since.is_none() {
        return false;
    }

    let bypass = request
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(',')
                .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
        });
    if bypass {
        return false;
    }

    if let Some(none_match) = none_match {
        let none_match = none_match.trim();
        if none_match != "*" {
            let Some(etag) = response.get(ETAG).and_then(|v| v.to_str().ok()) else {
                return false;
            };

            let matched = none_match
                .split(',')
                .map(str::trim)
                .any(|candidate| strip_weak(candidate) == strip_weak(etag));
            if !matched {
                return false;
            }
        }
    }

    if modified_since.is_some() && response.get(LAST_MODIFIED).is_none() {
        return false;
    }

    true
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
