//! Client configuration.

use std::time::Duration;

use crate::redirect::Policy;

/// Tunables for a fetch session.
///
/// The defaults match the behavior of a plain interactive page fetch:
/// a 10 second transport timeout, at most 5 redirect hops, and the system
/// trust store for TLS verification.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Product token sent as the `User-Agent` request header.
    pub user_agent: String,
    /// Read and write timeout applied to the socket after connect.
    pub io_timeout: Duration,
    /// Redirect hop policy.
    pub redirect: Policy,
    /// Load platform root certificates; webpki roots are the fallback.
    pub use_native_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("pagefetch/", env!("CARGO_PKG_VERSION")).to_string(),
            io_timeout: Duration::from_secs(10),
            redirect: Policy::default(),
            use_native_certs: true,
        }
    }
}
