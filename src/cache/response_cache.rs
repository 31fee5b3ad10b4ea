//! Keyed response storage with lazy eviction.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;
use http::header::CACHE_CONTROL;
use http::HeaderMap;

use super::cache_entry::{parse_max_age, CacheEntry};

/// Shared cache mapping canonical cache keys to stored bodies.
///
/// The interior mutex serializes lookup-then-store, so concurrent host
/// environments cannot interleave a stale timestamp with a fresh body.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored body when present and still fresh. A stale entry
    /// is removed and reported as a miss.
    pub fn lookup(&self, key: &str) -> Option<Bytes> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_fresh() => {
                tracing::debug!(key, "cache hit");
                Some(entry.body())
            }
            Some(_) => {
                tracing::debug!(key, "cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores the body when the response's `Cache-Control` allows it:
    /// `no-store` anywhere disables storage unconditionally, otherwise a
    /// parseable `max-age` sets the validity window. Malformed directives
    /// make the response non-cacheable rather than failing the fetch.
    pub fn maybe_store(&self, key: &str, body: Bytes, headers: &HeaderMap) {
        let Some(cache_control) = headers
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
        else {
            return;
        };

        if cache_control.to_ascii_lowercase().contains("no-store") {
            tracing::debug!(key, "no-store, not caching");
            return;
        }

        let Some(max_age) = parse_max_age(cache_control) else {
            return;
        };

        tracing::debug!(key, max_age, "caching response");
        self.lock()
            .insert(key.to_string(), CacheEntry::new(body, Duration::from_secs(max_age)));
    }

    /// Number of live entries, stale ones included until their next lookup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(cache_control: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache_control));
        headers
    }

    #[test]
    fn stores_with_max_age() {
        let cache = ResponseCache::new();
        cache.maybe_store("k", Bytes::from_static(b"body"), &headers("max-age=60"));
        assert_eq!(cache.lookup("k").unwrap(), Bytes::from_static(b"body"));
    }

    #[test]
    fn no_store_wins_over_max_age() {
        let cache = ResponseCache::new();
        cache.maybe_store("k", Bytes::from_static(b"body"), &headers("no-store, max-age=60"));
        assert!(cache.lookup("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn absent_directives_store_nothing() {
        let cache = ResponseCache::new();
        cache.maybe_store("k", Bytes::from_static(b"body"), &HeaderMap::new());
        cache.maybe_store("k2", Bytes::from_static(b"body"), &headers("public"));
        assert!(cache.is_empty());
    }

    #[test]
    fn malformed_max_age_is_not_cacheable() {
        let cache = ResponseCache::new();
        cache.maybe_store("k", Bytes::from_static(b"body"), &headers("max-age=banana"));
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_max_age_expires_immediately_and_is_evicted() {
        let cache = ResponseCache::new();
        cache.maybe_store("k", Bytes::from_static(b"body"), &headers("max-age=0"));
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("k").is_none());
        assert!(cache.is_empty());
    }
}
