//! GET request construction.

use crate::config::HttpConfig;
use crate::http::url::ParsedUrl;

/// Builds the request line and header block for a keep-alive GET.
///
/// No request body is ever sent; this client is GET-only. The `Host` value
/// carries the port only when it is not the scheme default.
#[must_use]
pub fn build_get(url: &ParsedUrl, config: &HttpConfig) -> String {
    let mut request = format!("GET {} HTTP/1.1\r\n", url.path);
    request.push_str(&format!("Host: {}\r\n", url.host_header()));
    request.push_str("Connection: keep-alive\r\n");
    request.push_str("Accept-Encoding: gzip\r\n");
    request.push_str(&format!("User-Agent: {}\r\n", config.user_agent));
    request.push_str("\r\n");
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_omitted_from_host() {
        let url = ParsedUrl::parse("http://example.org/page").unwrap();
        let request = build_get(&url, &HttpConfig::default());
        assert!(request.starts_with("GET /page HTTP/1.1\r\n"));
        assert!(request.contains("Host: example.org\r\n"));
        assert!(request.contains("Connection: keep-alive\r\n"));
        assert!(request.contains("Accept-Encoding: gzip\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[test]
    fn explicit_port_kept_in_host() {
        let url = ParsedUrl::parse("http://example.org:8080/").unwrap();
        let request = build_get(&url, &HttpConfig::default());
        assert!(request.contains("Host: example.org:8080\r\n"));
    }
}
