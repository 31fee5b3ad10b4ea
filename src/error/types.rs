use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `pagefetch::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while fetching a resource.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    url: Option<String>,
}

/// Classification of a fetch failure.
///
/// Input-validation, connection, framing, redirect-policy, and decode
/// failures are all fatal to the call that produced them; nothing in this
/// crate retries a failed network operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// URL decomposition or resolution failure.
    Url,
    /// DNS, TCP connect, TLS handshake, or mid-stream transport failure.
    Connect,
    /// A blocking read or write exceeded its bounded timeout.
    Timeout,
    /// Status line or body framing could not be parsed.
    MalformedResponse,
    /// A 3xx response arrived without a Location header.
    MissingRedirectTarget,
    /// The redirect chain exceeded the configured hop limit.
    TooManyRedirects,
    /// The declared content encoding could not be reversed.
    Decode,
}

impl Error {
    pub(crate) fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    pub(crate) fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    pub(crate) fn with_url(mut self, url: impl Into<String>) -> Error {
        self.inner.url = Some(url.into());
        self
    }

    /// The classification of this error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// The URL associated with this error, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    /// True when the failure was a transport timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.inner.kind == Kind::Timeout
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("pagefetch::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self.inner.kind {
            Kind::Url => "invalid URL",
            Kind::Connect => "connection error",
            Kind::Timeout => "request timeout",
            Kind::MalformedResponse => "malformed response",
            Kind::MissingRedirectTarget => "redirect without Location header",
            Kind::TooManyRedirects => "too many redirects",
            Kind::Decode => "error decoding response body",
        };
        f.write_str(desc)?;

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}
