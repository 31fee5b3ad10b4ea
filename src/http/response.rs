//! Response framing: status line, header block, and body.
//!
//! All of the wire grammar is parsed here so malformed input funnels through
//! one failure surface. The reader is any [`BufRead`]; the client hands in
//! its held connection, tests hand in byte cursors.
//!
//! Body length is decided in priority order: a `Transfer-Encoding`
//! containing `chunked` wins, then an explicit `Content-Length`, and with
//! neither the body runs to end of stream (after which the connection
//! cannot be reused).

use std::io::BufRead;

use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::error::{self, Result};

/// How the body's extent is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// Size-prefixed chunks terminated by a zero-length chunk.
    Chunked,
    /// Exactly this many bytes.
    Length(u64),
    /// Read until the peer closes the stream.
    Close,
}

impl BodyFraming {
    /// Decides the framing mode from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        if let Some(te) = headers.get(TRANSFER_ENCODING) {
            let te = te.to_str().unwrap_or("");
            if te.to_ascii_lowercase().contains("chunked") {
                return Ok(BodyFraming::Chunked);
            }
        }

        if let Some(len) = headers.get(CONTENT_LENGTH) {
            let len = len
                .to_str()
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .ok_or_else(|| error::malformed("unparseable Content-Length"))?;
            return Ok(BodyFraming::Length(len));
        }

        Ok(BodyFraming::Close)
    }
}

/// Reads one CRLF-terminated line, without its terminator.
///
/// Header text is treated as bytes and lossily decoded; an EOF before the
/// terminator means the peer closed mid-message.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw).map_err(error::io)?;
    if n == 0 {
        return Err(error::connect("connection closed mid-response"));
    }
    while matches!(raw.last(), Some(b'\n') | Some(b'\r')) {
        raw.pop();
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Reads and splits the status line into code and reason phrase.
///
/// The line must have at least three whitespace-delimited fields
/// (version, code, reason); the reason may itself contain spaces and may
/// be empty.
pub fn read_status_line<R: BufRead>(reader: &mut R) -> Result<(StatusCode, String)> {
    let line = read_line(reader)?;

    let mut fields = line.splitn(3, ' ');
    let (Some(_version), Some(code), Some(reason)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(error::malformed(format!("short status line `{line}`")));
    };

    let status = code
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| error::malformed(format!("bad status code `{code}`")))?;

    Ok((status, reason.to_string()))
}

/// Reads header lines up to the blank terminator.
///
/// Names are case-folded by `HeaderMap`; values are trimmed; a duplicated
/// name keeps the last occurrence. Lines without a colon (and names or
/// values `http` rejects) are skipped rather than aborting the loop.
pub fn read_headers<R: BufRead>(reader: &mut R) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            tracing::debug!(line = %line, "skipping header line without colon");
            continue;
        };

        let name = match HeaderName::from_bytes(name.trim().as_bytes()) {
            Ok(name) => name,
            Err(_) => {
                tracing::debug!(name = %name, "skipping header with invalid name");
                continue;
            }
        };
        let value = match HeaderValue::from_str(value.trim()) {
            Ok(value) => value,
            Err(_) => {
                tracing::debug!(name = %name, "skipping header with invalid value");
                continue;
            }
        };

        headers.insert(name, value);
    }

    Ok(headers)
}

/// Reads the body under the decided framing mode. The returned bytes are
/// still content-encoded; decompression happens afterwards.
pub fn read_body<R: BufRead>(reader: &mut R, framing: BodyFraming) -> Result<Vec<u8>> {
    match framing {
        BodyFraming::Chunked => read_chunked(reader),
        BodyFraming::Length(len) => {
            let mut body = vec![0u8; usize::try_from(len).map_err(|_| error::malformed("Content-Length overflow"))?];
            reader.read_exact(&mut body).map_err(error::io)?;
            Ok(body)
        }
        BodyFraming::Close => {
            let mut body = Vec::new();
            reader.read_to_end(&mut body).map_err(error::io)?;
            Ok(body)
        }
    }
}

/// Decodes a chunked body: hex size line, payload, CRLF, repeated; a zero
/// size terminates, followed by trailer lines discarded up to a blank line.
fn read_chunked<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    loop {
        let size_line = read_line(reader)?;
        // Chunk extensions after `;` are ignored.
        let size_field = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_field, 16)
            .map_err(|_| error::malformed(format!("bad chunk size `{size_line}`")))?;

        if size == 0 {
            loop {
                let trailer = read_line(reader)?;
                if trailer.is_empty() {
                    break;
                }
                tracing::trace!(line = %trailer, "discarding trailer");
            }
            return Ok(body);
        }

        let start = body.len();
        body.resize(start + size, 0);
        reader.read_exact(&mut body[start..]).map_err(error::io)?;

        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).map_err(error::io)?;
        if &crlf != b"\r\n" {
            return Err(error::malformed("chunk payload not followed by CRLF"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::Kind;

    #[test]
    fn status_line_splits_three_fields() {
        let mut input = Cursor::new(b"HTTP/1.1 200 OK\r\n".to_vec());
        let (status, reason) = read_status_line(&mut input).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reason, "OK");
    }

    #[test]
    fn status_reason_may_contain_spaces() {
        let mut input = Cursor::new(b"HTTP/1.1 404 Not Found\r\n".to_vec());
        let (status, reason) = read_status_line(&mut input).unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(reason, "Not Found");
    }

    #[test]
    fn short_status_line_is_malformed() {
        let mut input = Cursor::new(b"HTTP/1.1 200\r\n".to_vec());
        let err = read_status_line(&mut input).unwrap_err();
        assert_eq!(err.kind(), Kind::MalformedResponse);
    }

    #[test]
    fn headers_fold_case_and_last_wins() {
        let mut input = Cursor::new(b"X-Thing: one\r\nx-thing: two\r\n\r\n".to_vec());
        let headers = read_headers(&mut input).unwrap();
        assert_eq!(headers.get("x-thing").unwrap(), "two");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn colonless_header_line_is_skipped() {
        let mut input = Cursor::new(b"Good: yes\r\nthis line has no colon\r\nAlso-Good: yes\r\n\r\n".to_vec());
        let headers = read_headers(&mut input).unwrap();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn chunked_framing_outranks_content_length() {
        let mut input = Cursor::new(
            b"Content-Length: 999\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec(),
        );
        let headers = read_headers(&mut input).unwrap();
        assert_eq!(BodyFraming::from_headers(&headers).unwrap(), BodyFraming::Chunked);
    }

    #[test]
    fn chunked_body_reassembles() {
        let mut input = Cursor::new(b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n".to_vec());
        let body = read_body(&mut input, BodyFraming::Chunked).unwrap();
        assert_eq!(body, b"Wikipedia");
    }

    #[test]
    fn chunked_trailers_are_discarded() {
        let mut input =
            Cursor::new(b"5\r\nhello\r\n0\r\nExpires: never\r\n\r\ntrailing garbage".to_vec());
        let body = read_body(&mut input, BodyFraming::Chunked).unwrap();
        assert_eq!(body, b"hello");
    }

    #[test]
    fn bad_chunk_size_is_malformed() {
        let mut input = Cursor::new(b"zz\r\n\r\n".to_vec());
        let err = read_body(&mut input, BodyFraming::Chunked).unwrap_err();
        assert_eq!(err.kind(), Kind::MalformedResponse);
    }

    #[test]
    fn content_length_ignores_trailing_bytes() {
        let mut input = Cursor::new(b"Helloleftover".to_vec());
        let body = read_body(&mut input, BodyFraming::Length(5)).unwrap();
        assert_eq!(body, b"Hello");
    }

    #[test]
    fn close_framing_reads_to_end() {
        let mut input = Cursor::new(b"everything until eof".to_vec());
        let body = read_body(&mut input, BodyFraming::Close).unwrap();
        assert_eq!(body, b"everything until eof");
    }
}
