use super::BoxError;
use super::helpers::TimedOut;
use super::types::{Error, Kind, Phase};

/// Creates an `Error` for a malformed proxy specifier, URL or setting.
pub fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config).with(e.into())
}

/// Creates an `Error` for a failure to reach the proxy.
pub fn dial<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Dial).with(e.into())
}

/// Creates an `Error` for a CONNECT request the proxy did not grant.
pub fn proxy_auth<E: Into<BoxError>>(
    status: Option<http::StatusCode>,
    status_line: impl Into<String>,
    e: E,
) -> Error {
    Error::new(Kind::ProxyAuth {
        status,
        status_line: status_line.into(),
    })
    .with(e.into())
}

/// Creates an `Error` for a TLS handshake failure.
pub fn tls<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Tls).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a body that ended early.
pub fn read<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Read).with(e.into())
}

/// Creates an `Error` for a request budget that ran out during `phase`.
pub fn timeout(phase: Phase) -> Error {
    Error::new(Kind::Timeout(phase)).with(TimedOut)
}
