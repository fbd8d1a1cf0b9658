//! Request execution

use proxyfetch_client::error;
use proxyfetch_client::{
    OutboundRequest, ProxyTarget, ProxyTransport, RequestBuilder, Response, Result, resolve,
};

use crate::builder::core::ProxyFetch;

/// A resolved fetch, ready to send.
#[derive(Debug)]
pub struct Prepared {
    pub transport: ProxyTransport,
    pub request: OutboundRequest,
    pub proxy: ProxyTarget,
}

impl Prepared {
    /// # Errors
    ///
    /// Returns the first transport error.
    pub async fn send(self) -> Result<Response> {
        self.transport.send(self.request, &self.proxy).await
    }
}

impl ProxyFetch {
    /// Resolve configuration and build the request without touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns a config error for a missing or malformed proxy, destination,
    /// header or setting.
    pub fn prepare(&self, destination: Option<&str>) -> Result<Prepared> {
        let proxy = self
            .proxy
            .as_deref()
            .ok_or_else(|| error::config("proxy is required"))?;

        let target = resolve(
            proxy,
            destination,
            self.username.as_deref(),
            self.password.as_deref(),
        )?;

        let mut builder = RequestBuilder::new(target.destination)
            .credentials(target.credentials.as_ref())
            .user_agent(self.config.user_agent.clone());
        for (name, value) in &self.headers {
            builder = builder.try_header(name, value)?;
        }

        Ok(Prepared {
            transport: ProxyTransport::new(self.config.clone())?,
            request: builder.build()?,
            proxy: target.proxy,
        })
    }

    /// Fetch `destination` through the configured proxy.
    ///
    /// # Errors
    ///
    /// Returns a config error before any I/O, or the transport error of the
    /// phase that failed.
    pub async fn get(self, destination: &str) -> Result<Response> {
        self.prepare(Some(destination))?.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_proxy_is_config_error() {
        let err = ProxyFetch::new().prepare(Some("https://example.test/")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn prepare_attaches_credentials_and_headers() {
        let prepared = ProxyFetch::new()
            .proxy("http://127.0.0.1:9050")
            .basic_auth("alice", "s3cret")
            .header("X-Trace", "abc")
            .user_agent("probe/1")
            .prepare(Some("https://example.test/"))
            .unwrap();

        let headers = prepared.request.headers();
        assert_eq!(headers["proxy-authorization"], "Basic YWxpY2U6czNjcmV0");
        assert_eq!(headers["x-trace"], "abc");
        assert_eq!(headers["user-agent"], "probe/1");
        assert_eq!(prepared.proxy.port(), 9050);
    }

    #[test]
    fn bad_header_line_rejected() {
        assert!(ProxyFetch::new().header_line("no separator").is_err());
        let fetch = ProxyFetch::new().header_line("Accept: text/plain").unwrap();
        assert_eq!(fetch.headers, vec![("Accept".to_string(), "text/plain".to_string())]);
    }

    #[test]
    fn invalid_timeout_rejected_before_io() {
        let err = ProxyFetch::new()
            .proxy("http://127.0.0.1:9050")
            .timeout(Some(std::time::Duration::ZERO))
            .prepare(Some("https://example.test/"))
            .unwrap_err();
        assert!(err.is_config());
    }
}
