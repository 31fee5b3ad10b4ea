//! HTTP/1.1 request construction, response framing, and body decoding.

pub mod compression;
pub mod request;
pub mod response;
pub mod url;
