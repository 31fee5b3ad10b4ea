//! Scripted transport doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pagefetch::config::HttpConfig;
use pagefetch::connect::{Connector, Transport};
use pagefetch::error::Result;
use pagefetch::{ParsedUrl, ResponseCache, Session};

/// A connector serving canned response bytes, one script per dial, and
/// counting dials so tests can assert how often the network was touched.
pub struct ScriptedConnector {
    scripts: Mutex<VecDeque<Vec<u8>>>,
    dials: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn new(scripts: Vec<Vec<u8>>) -> (Box<Self>, Arc<AtomicUsize>) {
        let dials = Arc::new(AtomicUsize::new(0));
        let connector = Box::new(Self {
            scripts: Mutex::new(scripts.into()),
            dials: Arc::clone(&dials),
        });
        (connector, dials)
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self, _url: &ParsedUrl, _config: &HttpConfig) -> Result<Box<dyn Transport>> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted connector dialed more times than scripted");
        Ok(Box::new(ScriptedTransport {
            reader: Cursor::new(script),
        }))
    }
}

/// Reads from the script; swallows writes (the request bytes).
struct ScriptedTransport {
    reader: Cursor<Vec<u8>>,
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session wired to scripted transports and a fresh private cache.
pub fn scripted_session(scripts: Vec<Vec<u8>>) -> (Session, Arc<AtomicUsize>) {
    let (connector, dials) = ScriptedConnector::new(scripts);
    let session = Session::with_parts(
        HttpConfig::default(),
        connector,
        Arc::new(ResponseCache::new()),
    );
    (session, dials)
}

/// Serializes a response: status line, headers, blank line, body.
pub fn response(status: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {status}\r\n").into_bytes();
    for (name, value) in headers {
        out.extend(format!("{name}: {value}\r\n").into_bytes());
    }
    out.extend(b"\r\n");
    out.extend(body);
    out
}

/// A 200 response with an exact `Content-Length`.
pub fn sized_response(headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let length = body.len().to_string();
    let mut all = vec![("Content-Length", length.as_str())];
    all.extend_from_slice(headers);
    response("200 OK", &all, body)
}
