use std::error::Error as StdError;
use std::fmt;

use super::BoxError;

/// A Result alias where the Err case is `proxyfetch_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, tunneling or fetching a request.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
    url: Option<url::Url>,
}

/// Stage of a proxied exchange.
///
/// The stages run strictly in this order; a failure in one ends the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Opening the stream to the proxy, including TLS to an `https` proxy.
    /// A failed proxy handshake is a dial error wrapping the TLS error.
    Dial,
    /// Sending CONNECT and waiting for the proxy to grant the tunnel.
    Connect,
    /// TLS handshake with the destination inside the tunnel.
    Tls,
    /// Writing the request and reading the full response.
    Exchange,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Dial => "dial",
            Phase::Connect => "connect",
            Phase::Tls => "tls",
            Phase::Exchange => "exchange",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Malformed proxy specifier, destination URL or client settings.
    Config,
    /// The proxy could not be reached.
    Dial,
    /// The proxy refused the CONNECT request.
    ProxyAuth {
        status: Option<http::StatusCode>,
        status_line: String,
    },
    /// TLS handshake failure against the destination inside the tunnel.
    Tls,
    /// I/O failure writing the request or reading the response head.
    Request,
    /// The response body ended before its framing completed.
    Read,
    /// The request budget ran out while `Phase` was in flight.
    Timeout(Phase),
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("proxyfetch_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Config => f.write_str("invalid configuration")?,
            Kind::Dial => f.write_str("failed to reach proxy")?,
            Kind::ProxyAuth { status_line, .. } => {
                write!(f, "proxy refused tunnel ({status_line})")?;
            }
            Kind::Tls => f.write_str("TLS handshake failed")?,
            Kind::Request => f.write_str("error sending request")?,
            Kind::Read => f.write_str("error reading response body")?,
            Kind::Timeout(phase) => write!(f, "request timed out during {phase} phase")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
