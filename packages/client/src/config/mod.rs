//! Client configuration and the proxy/destination resolver
//!
//! `ClientConfig` holds the transport settings; [`resolve`] turns the raw
//! strings handed over by the command line into typed targets.

pub mod resolver;
pub mod validation;

use std::time::Duration;

pub use resolver::{ResolvedTarget, parse_destination, resolve};
pub use validation::{ConfigResult, ConfigurationError, Validator};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("proxyfetch/", env!("CARGO_PKG_VERSION"));

/// Transport settings for a [`ProxyTransport`](crate::ProxyTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Budget for the whole exchange: dial, CONNECT, TLS and body read.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Limit on opening the TCP stream to the proxy.
    pub connect_timeout: Duration,
    /// Skip certificate verification for the proxy and the destination.
    pub insecure: bool,
    /// Trust the platform certificate store in addition to the bundled roots.
    pub use_native_certs: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Duration::from_secs(10),
            insecure: false,
            use_native_certs: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Opt in to accepting any server certificate.
    ///
    /// Proxies and test destinations frequently present self-signed
    /// certificates. Handshake signatures are still checked.
    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn with_native_certs(mut self, use_native_certs: bool) -> Self {
        self.use_native_certs = use_native_certs;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
