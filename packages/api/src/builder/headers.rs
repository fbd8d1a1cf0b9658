//! Extra request headers

use crate::builder::core::ProxyFetch;

impl ProxyFetch {
    /// Add a header to the outbound request.
    ///
    /// Headers are also written on the CONNECT request of `https` fetches.
    /// An invalid name or value is reported when the request is prepared.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a header given as a single `Name: value` line.
    ///
    /// # Errors
    ///
    /// Returns a config error if the line has no `:`.
    pub fn header_line(self, line: &str) -> proxyfetch_client::Result<Self> {
        let (name, value) = line.split_once(':').ok_or_else(|| {
            proxyfetch_client::error::config(format!("header {line:?} must be 'Name: value'"))
        })?;
        Ok(self.header(name.trim(), value.trim()))
    }
}
