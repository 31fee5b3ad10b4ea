//! rustls client configuration.
//!
//! Built once per process and shared; host verification uses the platform
//! trust store when enabled, with the bundled webpki roots as the fallback
//! when loading it fails or is disabled. No certificate pinning.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rustls::{ClientConfig, RootCertStore};

static TLS_CONFIG: OnceCell<Arc<ClientConfig>> = OnceCell::new();

/// The process-wide TLS client configuration.
pub fn client_config(use_native_certs: bool) -> Result<Arc<ClientConfig>, rustls::Error> {
    TLS_CONFIG
        .get_or_try_init(|| build_client_config(use_native_certs).map(Arc::new))
        .cloned()
}

fn build_client_config(use_native_certs: bool) -> Result<ClientConfig, rustls::Error> {
    let mut root_store = RootCertStore::empty();

    if use_native_certs {
        let loaded = rustls_native_certs::load_native_certs();
        for cert in loaded.certs {
            if let Err(e) = root_store.add(cert) {
                tracing::warn!("failed to add system certificate: {e}");
            }
        }
        for err in &loaded.errors {
            tracing::warn!("certificate load error: {err}");
        }
        if !loaded.errors.is_empty() || root_store.is_empty() {
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }
        tracing::debug!("loaded {} root certificates", root_store.len());
    } else {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
