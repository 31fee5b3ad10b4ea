//! Transport establishment and the held connection.
//!
//! A [`Connector`] turns a parsed URL into a byte stream; the default
//! [`TcpConnector`](tcp::TcpConnector) dials TCP and wraps https origins in
//! rustls. Tests substitute scripted connectors to exercise the client
//! without a network.
//!
//! A [`Connection`] is owned by exactly one session at a time and is never
//! validated against the origin it was opened for at this layer; the session
//! tracks that pairing.

pub mod tcp;

use std::io::{self, BufRead, BufReader, Read, Write};

use crate::config::HttpConfig;
use crate::error::Result;
use crate::http::url::ParsedUrl;

/// A bidirectional byte stream to an origin, plain or encrypted.
pub trait Transport: Read + Write + Send {}

impl<T: Read + Write + Send> Transport for T {}

/// Dials an origin. The DNS/TCP/TLS primitive the client consumes.
pub trait Connector: Send {
    fn connect(&self, url: &ParsedUrl, config: &HttpConfig) -> Result<Box<dyn Transport>>;
}

/// An established transport with buffered reads.
///
/// The buffer position is part of the keep-alive contract: after a fully
/// framed body the reader sits exactly at the start of the next response.
pub struct Connection {
    io: BufReader<Box<dyn Transport>>,
}

impl Connection {
    #[must_use]
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            io: BufReader::new(transport),
        }
    }

    /// Writes a complete request and flushes it in one call.
    pub fn send_request(&mut self, request: &[u8]) -> io::Result<()> {
        let writer = self.io.get_mut();
        writer.write_all(request)?;
        writer.flush()
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.io.read(buf)
    }
}

impl BufRead for Connection {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.io.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.io.consume(amt);
    }
}
