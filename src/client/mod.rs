//! The fetch session: cache front, connection reuse, and the fetch loop.

use std::sync::Arc;

use bytes::Bytes;

use crate::cache::ResponseCache;
use crate::config::HttpConfig;
use crate::connect::tcp::TcpConnector;
use crate::connect::{Connection, Connector};
use crate::error::{self, Result};
use crate::http::response::{self, BodyFraming};
use crate::http::url::{Origin, ParsedUrl};
use crate::http::{compression, request};

/// A synchronous fetch session.
///
/// Holds at most one transport connection, opened lazily and reused across
/// sequential fetches to the same origin (keep-alive). Dropping the session
/// releases the connection. `&mut self` on [`fetch`](Self::fetch) makes
/// reentrant use impossible; only the cache is meant to be shared.
pub struct Session {
    config: HttpConfig,
    connector: Box<dyn Connector>,
    cache: Arc<ResponseCache>,
    held: Option<HeldConnection>,
}

struct HeldConnection {
    origin: Origin,
    conn: Connection,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session with default configuration, the TCP connector, and a private
    /// cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HttpConfig) -> Self {
        Self::with_parts(config, Box::new(TcpConnector), Arc::new(ResponseCache::new()))
    }

    /// Full constructor: callers share one [`ResponseCache`] across sessions
    /// to get process-wide caching; tests substitute scripted connectors.
    #[must_use]
    pub fn with_parts(
        config: HttpConfig,
        connector: Box<dyn Connector>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            config,
            connector,
            cache,
            held: None,
        }
    }

    /// The cache this session consults and fills.
    #[must_use]
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Fetches `raw`, following redirects, and returns the decoded body.
    pub fn fetch(&mut self, raw: &str) -> Result<Bytes> {
        let url = ParsedUrl::parse(raw).map_err(|e| error::url(e).with_url(raw.to_string()))?;
        self.fetch_url(url)
    }

    /// Fetches an already parsed URL. This is also the redirect recursion
    /// point; `url.redirect_count` carries the hops taken so far.
    pub fn fetch_url(&mut self, url: ParsedUrl) -> Result<Bytes> {
        let key = url.cache_key();

        if let Some(body) = self.cache.lookup(&key) {
            return Ok(body);
        }

        let mut held = self.checkout(&url)?;

        let request = request::build_get(&url, &self.config);
        held.conn
            .send_request(request.as_bytes())
            .map_err(|e| error::io(e).with_url(key.clone()))?;

        let (status, _reason) =
            response::read_status_line(&mut held.conn).map_err(|e| e.with_url(key.clone()))?;
        let headers =
            response::read_headers(&mut held.conn).map_err(|e| e.with_url(key.clone()))?;

        if status.is_redirection() {
            // The redirect body was never framed, so the read position
            // cannot be trusted for reuse.
            drop(held);
            let next =
                crate::redirect::resolve_target(&url, &headers).map_err(|e| e.with_url(key.clone()))?;
            if !self.config.redirect.allows(next.redirect_count) {
                return Err(error::too_many_redirects().with_url(key));
            }
            tracing::debug!(
                status = status.as_u16(),
                hop = next.redirect_count,
                target = %next.cache_key(),
                "following redirect"
            );
            return self.fetch_url(next);
        }

        let framing =
            BodyFraming::from_headers(&headers).map_err(|e| e.with_url(key.clone()))?;
        let body = response::read_body(&mut held.conn, framing)
            .map_err(|e| e.with_url(key.clone()))?;

        // A read-to-close body consumes the stream; anything else leaves the
        // connection positioned at the next response.
        if framing != BodyFraming::Close {
            self.held = Some(held);
        }

        let body = compression::decode_body(body, &headers).map_err(|e| e.with_url(key.clone()))?;
        self.cache.maybe_store(&key, body.clone(), &headers);

        Ok(body)
    }

    /// Returns the held connection when it targets `url`'s origin, dialing
    /// a fresh one otherwise. The stale connection, if any, is dropped.
    fn checkout(&mut self, url: &ParsedUrl) -> Result<HeldConnection> {
        let origin = url.origin();

        if let Some(held) = self.held.take() {
            if held.origin == origin {
                tracing::trace!(%origin, "reusing held connection");
                return Ok(held);
            }
            tracing::trace!(old = %held.origin, new = %origin, "origin changed, dropping held connection");
        }

        let transport = self.connector.connect(url, &self.config)?;
        Ok(HeldConnection {
            origin,
            conn: Connection::new(transport),
        })
    }
}
