//! Proxy endpoint parsing
//!
//! A proxy is given as `scheme://host:port`. The scheme decides whether the
//! stream to the proxy itself is wrapped in TLS; the port is mandatory.

use std::fmt;
use std::str::FromStr;

use crate::error::{self, Error, Result};

/// How the client talks to the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyScheme {
    Http,
    Https,
}

impl ProxyScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyScheme::Http => "http",
            ProxyScheme::Https => "https",
        }
    }

    /// Returns true when the proxy connection is TLS-wrapped.
    #[must_use]
    pub fn is_tls(self) -> bool {
        matches!(self, ProxyScheme::Https)
    }
}

impl FromStr for ProxyScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("http") {
            Ok(ProxyScheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(ProxyScheme::Https)
        } else {
            Err(error::config(format!(
                "unsupported proxy scheme {s:?}, expected http or https"
            )))
        }
    }
}

impl fmt::Display for ProxyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proxy endpoint.
///
/// IPv6 hosts are stored without brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyTarget {
    scheme: ProxyScheme,
    host: String,
    port: u16,
}

impl ProxyTarget {
    /// # Errors
    ///
    /// Returns a config error if `host` is empty.
    pub fn new(scheme: ProxyScheme, host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(error::config("proxy host cannot be empty"));
        }
        Ok(Self { scheme, host, port })
    }

    /// Parse a `scheme://host:port` specifier.
    ///
    /// A single trailing `/` is tolerated. No default port is inferred.
    ///
    /// # Errors
    ///
    /// Returns a config error when the `://` delimiter, host or port is
    /// missing, the scheme is not http/https, or the specifier carries
    /// userinfo, a path or a query.
    pub fn parse(specifier: &str) -> Result<Self> {
        let specifier = specifier.trim();
        let Some((scheme, rest)) = specifier.split_once("://") else {
            return Err(error::config(format!(
                "proxy {specifier:?} has no scheme, expected scheme://host:port"
            )));
        };

        let scheme: ProxyScheme = scheme.parse()?;
        let authority = rest.strip_suffix('/').unwrap_or(rest);
        if authority.contains(['/', '?', '#', '@']) {
            return Err(error::config(format!(
                "proxy {specifier:?} must be of the form scheme://host:port"
            )));
        }

        let (host, port) = split_host_port(authority)
            .map_err(|reason| error::config(format!("proxy {specifier:?}: {reason}")))?;
        Self::new(scheme, host, port)
    }

    #[must_use]
    pub fn scheme(&self) -> ProxyScheme {
        self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ProxyTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProxyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority())
    }
}

fn split_host_port(authority: &str) -> std::result::Result<(&str, u16), String> {
    let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| "unterminated IPv6 literal".to_string())?;
        let port = after
            .strip_prefix(':')
            .ok_or_else(|| "missing port".to_string())?;
        (host, port)
    } else {
        let (host, port) = authority
            .rsplit_once(':')
            .ok_or_else(|| "missing port".to_string())?;
        if host.contains(':') {
            return Err("IPv6 hosts must be enclosed in brackets".to_string());
        }
        (host, port)
    };

    if host.is_empty() {
        return Err("missing host".to_string());
    }
    if port.is_empty() {
        return Err("missing port".to_string());
    }
    let port: u16 = port
        .parse()
        .map_err(|_| format!("invalid port {port:?}"))?;
    if port == 0 {
        return Err("port cannot be zero".to_string());
    }

    Ok((host, port))
}
