//! Redirect resolution and hop policy.
//!
//! A 3xx response never exposes a body; the resolver turns its `Location`
//! header into the next fetch target and the session re-enters the full
//! fetch there. The policy bounds the chain length.

use http::header::LOCATION;
use http::HeaderMap;

use crate::error::{self, Result};
use crate::http::url::ParsedUrl;

/// Bound on the length of a redirect chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    max_hops: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self { max_hops: 5 }
    }
}

impl Policy {
    /// A policy allowing at most `max_hops` hops. `limited(0)` refuses all
    /// redirects.
    #[must_use]
    pub fn limited(max_hops: u32) -> Self {
        Self { max_hops }
    }

    /// Checks whether hop number `hop` (1-based) may be followed.
    #[must_use]
    pub fn allows(&self, hop: u32) -> bool {
        hop <= self.max_hops
    }
}

/// Resolves the redirect target for `url` from the response headers.
///
/// Fails when `Location` is absent, unreadable, or does not resolve. The
/// returned URL carries `redirect_count = url.redirect_count + 1`; policy
/// enforcement stays with the caller.
pub fn resolve_target(url: &ParsedUrl, headers: &HeaderMap) -> Result<ParsedUrl> {
    let location = headers
        .get(LOCATION)
        .ok_or_else(error::missing_redirect_target)?;
    let location = location
        .to_str()
        .map_err(|e| error::missing_redirect_target().with(e))?;

    let mut next = url
        .resolve(location)
        .map_err(|e| error::url(e).with_url(location.to_string()))?;
    next.redirect_count = url.redirect_count + 1;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;
    use crate::error::Kind;

    #[test]
    fn default_policy_allows_five_hops() {
        let policy = Policy::default();
        assert!(policy.allows(5));
        assert!(!policy.allows(6));
    }

    #[test]
    fn zero_limit_refuses_all() {
        assert!(!Policy::limited(0).allows(1));
    }

    #[test]
    fn missing_location_is_an_error() {
        let url = ParsedUrl::parse("http://example.org/").unwrap();
        let err = resolve_target(&url, &HeaderMap::new()).unwrap_err();
        assert_eq!(err.kind(), Kind::MissingRedirectTarget);
    }

    #[test]
    fn relative_location_resolves_and_counts_hop() {
        let mut url = ParsedUrl::parse("http://example.org/a/b").unwrap();
        url.redirect_count = 2;

        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/moved"));

        let next = resolve_target(&url, &headers).unwrap();
        assert_eq!(next.cache_key(), "http://example.org:80/moved");
        assert_eq!(next.redirect_count, 3);
    }
}
