//! Core `ProxyFetch` structure and transport settings

use std::time::Duration;

use proxyfetch_client::ClientConfig;

/// Builder for a single proxied GET.
///
/// Nothing is validated until [`ProxyFetch::get`] or
/// [`ProxyFetch::prepare`] runs; every problem then surfaces as a config
/// error before any connection is made.
#[derive(Debug, Clone, Default)]
pub struct ProxyFetch {
    pub(crate) proxy: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) config: ClientConfig,
}

impl ProxyFetch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Proxy endpoint as `scheme://host:port`.
    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Replace all transport settings at once.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Accept self-signed or otherwise unverifiable certificates.
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config = self.config.with_insecure(insecure);
        self
    }

    /// Budget for the whole exchange. `None` disables it.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(connect_timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    #[must_use]
    pub fn native_certs(mut self, use_native_certs: bool) -> Self {
        self.config = self.config.with_native_certs(use_native_certs);
        self
    }
}
