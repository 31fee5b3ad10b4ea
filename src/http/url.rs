//! URL decomposition and reference resolution.
//!
//! A [`ParsedUrl`] splits `scheme://host[:port][/path]` into its transport
//! components and derives the canonical cache key. Resolution of `Location`
//! targets supports absolute URLs, scheme-relative and root-relative
//! references, and relative paths with `.`/`..` normalization; full RFC 3986
//! generality is deliberately out of scope.

use std::fmt;

use thiserror::Error;

/// Transport scheme of a fetchable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Port implied by the scheme when the URL carries none.
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL decomposition failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("missing `://` scheme separator")]
    MissingScheme,
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    #[error("empty host")]
    EmptyHost,
}

/// The (scheme, host, port) triple identifying a server endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// A decomposed URL, immutable once constructed apart from the redirect hop
/// counter maintained by the redirect resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Scheme,
    /// Set by a `view-source:` prefix. Never affects transport; carried for
    /// the presentation layer.
    pub source_view: bool,
    pub host: String,
    pub port: u16,
    /// Always begins with `/`.
    pub path: String,
    /// Hops taken to reach this URL; 0 for a caller-supplied URL.
    pub redirect_count: u32,
}

impl ParsedUrl {
    /// Splits a raw URL string into scheme, host, port, and path.
    ///
    /// The first `/` after the scheme separator divides host from path; an
    /// absent path defaults to `/`. A `:` inside the host segment introduces
    /// an explicit decimal port.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let (source_view, rest) = match raw.strip_prefix("view-source:") {
            Some(inner) => (true, inner),
            None => (false, raw),
        };

        let (scheme, rest) = rest.split_once("://").ok_or(UrlError::MissingScheme)?;
        let scheme = match scheme {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(UrlError::UnsupportedScheme(other.to_string())),
        };

        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, format!("/{path}")),
            None => (rest, "/".to_string()),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| UrlError::InvalidPort(port.to_string()))?;
                (host, port)
            }
            None => (authority, scheme.default_port()),
        };

        if host.is_empty() {
            return Err(UrlError::EmptyHost);
        }

        Ok(ParsedUrl {
            scheme,
            source_view,
            host: host.to_string(),
            port,
            path,
            redirect_count: 0,
        })
    }

    /// Canonical cache key, stable and unique per resource target.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }

    /// The endpoint this URL dials.
    #[must_use]
    pub fn origin(&self) -> Origin {
        Origin {
            scheme: self.scheme,
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Value for the `Host` request header; carries the port only when it
    /// differs from the scheme default.
    #[must_use]
    pub fn host_header(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Resolves a `Location` reference against this URL.
    ///
    /// Absolute targets parse fresh; `//host/...` inherits the scheme;
    /// `/...` keeps the origin; anything else resolves against the directory
    /// of the current path. The result carries a zeroed hop counter — the
    /// redirect resolver sets it explicitly.
    pub fn resolve(&self, location: &str) -> Result<Self, UrlError> {
        if location.contains("://") {
            return Self::parse(location);
        }
        if let Some(rest) = location.strip_prefix("//") {
            return Self::parse(&format!("{}://{}", self.scheme, rest));
        }

        let joined = if location.starts_with('/') {
            location.to_string()
        } else {
            let dir = self.path.rsplit_once('/').map_or("", |(dir, _)| dir);
            format!("{dir}/{location}")
        };

        Ok(ParsedUrl {
            scheme: self.scheme,
            source_view: self.source_view,
            host: self.host.clone(),
            port: self.port,
            path: normalize_path(&joined),
            redirect_count: 0,
        })
    }
}

/// Collapses `.`/`..`/empty segments; the result always begins with `/`.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    if path.ends_with('/') && !segments.is_empty() {
        out.push('/');
    }
    out
}
