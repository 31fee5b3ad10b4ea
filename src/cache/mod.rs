//! Time-bounded response cache.
//!
//! A process-wide mapping from canonical cache key to a stored, already
//! decompressed body. Storage honors `Cache-Control`: `no-store` disables it
//! unconditionally, a parseable `max-age` enables it for that many seconds,
//! and anything else stores nothing. Expired entries are evicted lazily on
//! the lookup that finds them stale; there is no background sweep.

mod cache_entry;
mod response_cache;

pub use cache_entry::CacheEntry;
pub use response_cache::ResponseCache;
