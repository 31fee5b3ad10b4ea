//! # pagefetch
//!
//! Minimal synchronous HTTP(S) client that fetches a single resource and
//! returns its decoded body.
//!
//! ## Features
//!
//! - **HTTP/1.1 keep-alive** — one connection per session, reused across
//!   sequential fetches to the same origin
//! - **Rustls TLS** with native root certificates
//! - **Content-length and chunked** body framing, plus read-to-close
//! - **Gzip decoding** of `Content-Encoding: gzip` bodies
//! - **Redirect following** with relative `Location` resolution, bounded
//!   at 5 hops
//! - **Response caching** honoring `Cache-Control` `no-store` / `max-age`
//!
//! Presentation concerns (tag stripping, `view-source` rendering), the
//! `file:`/`data:` pseudo-schemes, and CLI handling live outside this crate;
//! it hands back bytes.
//!
//! ## Usage
//!
//! ```no_run
//! use pagefetch::Session;
//!
//! fn main() -> Result<(), pagefetch::Error> {
//!     let mut session = Session::new();
//!     let body = session.fetch("https://example.org/index.html")?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod cache;
pub mod client;
pub mod config;
pub mod connect;
pub mod error;
pub mod http;
pub mod redirect;
pub mod tls;

pub use cache::ResponseCache;
pub use client::Session;
pub use config::HttpConfig;
pub use error::{Error, Kind, Result};
pub use http::url::{ParsedUrl, Scheme, UrlError};
