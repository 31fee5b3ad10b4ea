//! Internal constructors mapping lower-level failures into [`Error`].

use std::error::Error as StdError;
use std::io;

use super::{Error, Kind};
use crate::http::url::UrlError;

pub(crate) fn url(e: UrlError) -> Error {
    Error::new(Kind::Url).with(e)
}

pub(crate) fn connect<E: Into<Box<dyn StdError + Send + Sync>>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e)
}

/// Classifies a transport io error. Read timeouts surface as `WouldBlock`
/// on unix and `TimedOut` on windows; everything else is a connection
/// failure.
pub(crate) fn io(e: io::Error) -> Error {
    let kind = match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Kind::Timeout,
        _ => Kind::Connect,
    };
    Error::new(kind).with(e)
}

pub(crate) fn malformed(detail: impl Into<String>) -> Error {
    Error::new(Kind::MalformedResponse).with(detail.into())
}

pub(crate) fn missing_redirect_target() -> Error {
    Error::new(Kind::MissingRedirectTarget)
}

pub(crate) fn too_many_redirects() -> Error {
    Error::new(Kind::TooManyRedirects)
}

pub(crate) fn decode<E: Into<Box<dyn StdError + Send + Sync>>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e)
}
