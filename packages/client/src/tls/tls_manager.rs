//! TLS client sessions over arbitrary streams
//!
//! One `TlsManager` serves both hops: the optional TLS connection to an
//! `https` proxy and the handshake with the destination inside a CONNECT
//! tunnel.

use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig as RustlsConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use super::verifier::InsecureVerifier;
use crate::config::ClientConfig;
use crate::connect::BoxedIo;
use crate::error::{self, Result};

/// TLS connector built from a [`ClientConfig`].
#[derive(Clone)]
pub struct TlsManager {
    connector: TlsConnector,
    insecure: bool,
}

impl std::fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsManager")
            .field("insecure", &self.insecure)
            .finish_non_exhaustive()
    }
}

impl TlsManager {
    /// Create the connector, loading trust roots unless `insecure` is set.
    ///
    /// # Errors
    ///
    /// Returns a TLS error if the crypto provider rejects the protocol
    /// versions.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = RustlsConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()
            .map_err(error::tls)?;

        let mut client_config = if config.insecure {
            tracing::warn!("TLS certificate verification is disabled");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(InsecureVerifier::new(provider)))
                .with_no_client_auth()
        } else {
            builder
                .with_root_certificates(root_store(config.use_native_certs))
                .with_no_client_auth()
        };
        client_config.alpn_protocols = vec![b"http/1.1".to_vec()];

        Ok(Self {
            connector: TlsConnector::from(Arc::new(client_config)),
            insecure: config.insecure,
        })
    }

    #[must_use]
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Run a TLS client handshake for `host` over `io`.
    ///
    /// # Errors
    ///
    /// Returns a TLS error for an invalid server name or a failed handshake.
    pub async fn handshake(&self, io: BoxedIo, host: &str) -> Result<TlsStream<BoxedIo>> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| error::tls(format!("invalid TLS server name {host:?}: {e}")))?;

        tracing::debug!("Starting TLS handshake with {}", host);
        let stream = self
            .connector
            .connect(server_name, io)
            .await
            .map_err(error::tls)?;
        tracing::debug!("TLS session established with {}", host);

        Ok(stream)
    }
}

fn root_store(use_native_certs: bool) -> RootCertStore {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if use_native_certs {
        let cert_result = rustls_native_certs::load_native_certs();
        for err in &cert_result.errors {
            tracing::warn!("Certificate load error: {}", err);
        }
        let (added, ignored) = root_store.add_parsable_certificates(cert_result.certs);
        tracing::debug!("Loaded {} system certificates ({} ignored)", added, ignored);
    }

    root_store
}
