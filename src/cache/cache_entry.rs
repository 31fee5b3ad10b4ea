//! Cache entry with wall-clock expiry.

use std::time::{Duration, Instant};

use bytes::Bytes;

/// A stored response body with its freshness window.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    stored_at: Instant,
    max_age: Duration,
    body: Bytes,
}

impl CacheEntry {
    #[must_use]
    pub fn new(body: Bytes, max_age: Duration) -> Self {
        Self {
            stored_at: Instant::now(),
            max_age,
            body,
        }
    }

    /// True while the entry's age is strictly inside its validity window.
    /// A `max-age=0` entry is never fresh.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.max_age
    }

    #[must_use]
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }
}

/// Extracts the first `max-age` directive from a `Cache-Control` value.
/// Returns `None` when the directive is absent or its value does not parse;
/// callers treat that as non-cacheable, never as an error.
#[must_use]
pub fn parse_max_age(cache_control: &str) -> Option<u64> {
    for directive in cache_control.split(',') {
        let directive = directive.trim();
        if let Some(value) = directive.strip_prefix("max-age=") {
            return value.trim().parse::<u64>().ok();
        }
    }
    None
}
