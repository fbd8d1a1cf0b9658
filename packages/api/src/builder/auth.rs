//! Proxy credentials

use crate::builder::core::ProxyFetch;

impl ProxyFetch {
    /// Authenticate to the proxy with `Basic` credentials.
    ///
    /// The resulting `Proxy-Authorization` header is sent on the CONNECT
    /// request for `https` destinations and on the forwarded request for
    /// `http` ones.
    ///
    /// # Examples
    /// ```no_run
    /// use proxyfetch::ProxyFetch;
    ///
    /// # async fn run() -> proxyfetch::Result<()> {
    /// let response = ProxyFetch::new()
    ///     .proxy("http://127.0.0.1:9050")
    ///     .basic_auth("alice", "s3cret")
    ///     .get("https://example.test/")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set credentials from optional parts, as they arrive from a command line.
    ///
    /// If only one half is present no credentials are sent.
    #[must_use]
    pub fn credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }
}
