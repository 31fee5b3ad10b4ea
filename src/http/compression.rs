//! Content-encoding reversal for framed bodies.
//!
//! Only gzip is requested (`Accept-Encoding: gzip`) and only gzip is
//! reversed; an absent or unrecognized `Content-Encoding` passes the body
//! through unchanged. Decoding runs strictly after framing and before
//! caching, so cached bodies are always stored decompressed.

use std::io::Read;

use bytes::Bytes;
use flate2::read::GzDecoder;
use http::header::CONTENT_ENCODING;
use http::HeaderMap;

use crate::error::{self, Result};

/// Reverses the declared content encoding on a framed body.
///
/// Corrupt or truncated gzip input fails with a decode error wrapping the
/// underlying cause.
pub fn decode_body(body: Vec<u8>, headers: &HeaderMap) -> Result<Bytes> {
    if !is_gzip(headers) {
        return Ok(Bytes::from(body));
    }

    let mut decoded = Vec::new();
    GzDecoder::new(body.as_slice())
        .read_to_end(&mut decoded)
        .map_err(error::decode)?;

    tracing::trace!(encoded = body.len(), decoded = decoded.len(), "gzip body decoded");
    Ok(Bytes::from(decoded))
}

fn is_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("gzip"))
}
