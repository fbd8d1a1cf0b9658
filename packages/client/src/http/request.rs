//! Outbound request construction
//!
//! The request is assembled once, with the `Proxy-Authorization` header
//! already in place, before the transport takes ownership of it. The
//! transport reads that header back when it writes the CONNECT preamble.

use bytes::Bytes;
use http::header::{ACCEPT, HOST, HeaderName, PROXY_AUTHORIZATION, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, Request, Version};
use http_body_util::Empty;
use url::{Host, Position, Url};

use crate::config::DEFAULT_USER_AGENT;
use crate::error::{self, Result};
use crate::proxy::Credentials;

/// A GET request bound for a destination behind the proxy.
///
/// Immutable once built; the transport consumes it by value.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl OutboundRequest {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns true when the destination is reached through a CONNECT tunnel.
    #[must_use]
    pub fn is_tunneled(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// `host:port` target of the CONNECT request; port defaults per scheme.
    ///
    /// # Errors
    ///
    /// Returns a config error if the URL has no host.
    pub fn connect_authority(&self) -> Result<String> {
        let host = self
            .url
            .host_str()
            .ok_or_else(|| error::config("destination URL has no host"))?;
        let port = self.url.port_or_known_default().unwrap_or(443);
        Ok(format!("{host}:{port}"))
    }

    /// Destination host as used for TLS server name verification.
    ///
    /// # Errors
    ///
    /// Returns a config error if the URL has no host.
    pub fn tls_host(&self) -> Result<String> {
        match self.url.host() {
            Some(Host::Domain(domain)) => Ok(domain.to_string()),
            Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
            Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
            None => Err(error::config("destination URL has no host")),
        }
    }

    /// Absolute-form request for a plain forward proxy:
    /// `GET http://host/path HTTP/1.1` with every header, credentials included.
    ///
    /// Userinfo in the destination URL never reaches the request line.
    pub(crate) fn to_forward_request(&self) -> Result<Request<Empty<Bytes>>> {
        let mut target = self.url.clone();
        target.set_fragment(None);
        // Only fails for URLs that cannot carry userinfo, which have none to strip.
        let _ = target.set_username("");
        let _ = target.set_password(None);
        self.to_http_request(target.as_str(), &self.headers)
    }

    /// Origin-form request written inside the TLS tunnel.
    ///
    /// `Proxy-Authorization` is addressed to the proxy alone and is dropped
    /// here so the destination never sees it.
    pub(crate) fn to_tunneled_request(&self) -> Result<Request<Empty<Bytes>>> {
        let mut headers = self.headers.clone();
        headers.remove(PROXY_AUTHORIZATION);
        self.to_http_request(&self.url[Position::BeforePath..Position::AfterQuery], &headers)
    }

    fn to_http_request(&self, target: &str, headers: &HeaderMap) -> Result<Request<Empty<Bytes>>> {
        let mut request = Request::builder()
            .method(self.method.clone())
            .uri(target)
            .version(Version::HTTP_11)
            .body(Empty::new())
            .map_err(error::request)?;
        *request.headers_mut() = headers.clone();
        Ok(request)
    }
}

/// Builder for [`OutboundRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: Url,
    credentials: Option<Credentials>,
    user_agent: String,
    headers: HeaderMap,
}

impl RequestBuilder {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Option<&Credentials>) -> Self {
        self.credentials = credentials.cloned();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add an extra header sent to the destination (and on CONNECT).
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Add an extra header from raw strings.
    ///
    /// # Errors
    ///
    /// Returns a config error if the name or value is not a valid header.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| error::config(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|e| error::config(format!("invalid value for header {name}: {e}")))?;
        Ok(self.header(name, value))
    }

    /// Assemble the request.
    ///
    /// Sets `Host`, `User-Agent` and `Accept` unless already given, then
    /// `Proxy-Authorization` when credentials are present.
    ///
    /// # Errors
    ///
    /// Returns a config error if the URL has no host or a header value is
    /// invalid.
    pub fn build(self) -> Result<OutboundRequest> {
        let mut headers = HeaderMap::with_capacity(self.headers.len() + 4);

        headers.insert(HOST, host_header(&self.url)?);
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| error::config(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let mut replaced: Option<HeaderName> = None;
        for (name, value) in self.headers {
            if let Some(name) = name {
                headers.insert(name.clone(), value);
                replaced = Some(name);
            } else if let Some(name) = &replaced {
                headers.append(name.clone(), value);
            }
        }

        if let Some(credentials) = &self.credentials {
            headers.insert(PROXY_AUTHORIZATION, credentials.to_header_value()?);
        }

        Ok(OutboundRequest {
            method: Method::GET,
            url: self.url,
            headers,
        })
    }
}

/// Build the GET request for `destination`, attaching proxy credentials.
///
/// # Errors
///
/// Returns a config error if the destination has no host.
pub fn build_request(destination: &Url, credentials: Option<&Credentials>) -> Result<OutboundRequest> {
    RequestBuilder::new(destination.clone())
        .credentials(credentials)
        .build()
}

fn host_header(url: &Url) -> Result<HeaderValue> {
    let host = url
        .host_str()
        .ok_or_else(|| error::config("destination URL has no host"))?;
    let value = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).map_err(error::config)
}
