//! Blocking TCP and TLS dialing.

use std::net::TcpStream;

use rustls::pki_types::ServerName;
use rustls::{ClientConnection, StreamOwned};

use super::{Connector, Transport};
use crate::config::HttpConfig;
use crate::error::{self, Result};
use crate::http::url::{ParsedUrl, Scheme};
use crate::tls;

/// Default connector: blocking TCP, rustls for https, bounded socket
/// timeouts applied after connect.
#[derive(Debug, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn connect(&self, url: &ParsedUrl, config: &HttpConfig) -> Result<Box<dyn Transport>> {
        tracing::debug!(host = %url.host, port = url.port, scheme = %url.scheme, "dialing");

        let stream =
            TcpStream::connect((url.host.as_str(), url.port)).map_err(error::connect)?;
        stream
            .set_read_timeout(Some(config.io_timeout))
            .map_err(error::connect)?;
        stream
            .set_write_timeout(Some(config.io_timeout))
            .map_err(error::connect)?;

        match url.scheme {
            Scheme::Http => Ok(Box::new(stream)),
            Scheme::Https => {
                let tls_config =
                    tls::client_config(config.use_native_certs).map_err(error::connect)?;
                let server_name =
                    ServerName::try_from(url.host.clone()).map_err(error::connect)?;
                let session =
                    ClientConnection::new(tls_config, server_name).map_err(error::connect)?;
                Ok(Box::new(StreamOwned::new(session, stream)))
            }
        }
    }
}
