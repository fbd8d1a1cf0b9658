//! Fully collected responses
//!
//! The body is read to the end before the caller sees the status. A stream
//! that ends before its content-length or chunked framing completes is a
//! read error, never a truncated success.

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode, Version};
use http_body_util::BodyExt;
use hyper::body::Incoming;

use crate::error::{self, Result};

/// Time spent in each phase of one exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// TCP connect to the proxy, plus TLS for an `https` proxy.
    pub dial: Duration,
    /// CONNECT round trip; `None` for plain forwarding.
    pub connect: Option<Duration>,
    /// TLS handshake with the destination; `None` for plain forwarding.
    pub tls: Option<Duration>,
    /// Writing the request and reading the full response.
    pub exchange: Duration,
}

impl PhaseTimings {
    #[must_use]
    pub fn total(&self) -> Duration {
        self.dial
            + self.connect.unwrap_or_default()
            + self.tls.unwrap_or_default()
            + self.exchange
    }
}

/// Destination response with its body fully in memory.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
    timings: PhaseTimings,
}

impl Response {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    #[must_use]
    pub fn timings(&self) -> &PhaseTimings {
        &self.timings
    }

    pub(crate) fn set_timings(&mut self, timings: PhaseTimings) {
        self.timings = timings;
    }

    /// Drain `response` into memory.
    pub(crate) async fn collect(response: hyper::Response<Incoming>) -> Result<Self> {
        let (parts, body) = response.into_parts();
        let body = body.collect().await.map_err(error::read)?.to_bytes();

        tracing::debug!(
            status = parts.status.as_u16(),
            bytes = body.len(),
            "response body collected"
        );

        Ok(Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body,
            timings: PhaseTimings::default(),
        })
    }
}
