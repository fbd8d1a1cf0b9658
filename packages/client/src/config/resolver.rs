//! Turns raw proxy, destination and credential strings into typed targets.
//!
//! Everything here runs before any socket is opened; failures are always
//! config errors.

use url::Url;

use crate::error::{self, Result};
use crate::proxy::{Credentials, ProxyTarget};

/// Output of [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub proxy: ProxyTarget,
    pub destination: Url,
    pub credentials: Option<Credentials>,
}

/// Resolve the proxy endpoint, destination URL and optional credentials.
///
/// # Errors
///
/// Returns a config error if the proxy specifier is malformed or the
/// destination is missing, relative, or not http/https.
pub fn resolve(
    proxy: &str,
    destination: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<ResolvedTarget> {
    let proxy = ProxyTarget::parse(proxy)?;
    let destination = parse_destination(destination)?;
    let credentials = Credentials::from_parts(username, password);

    tracing::debug!(
        proxy = %proxy,
        destination = %destination,
        authenticated = credentials.is_some(),
        "resolved proxy target"
    );

    Ok(ResolvedTarget {
        proxy,
        destination,
        credentials,
    })
}

/// Validate the destination URL.
///
/// # Errors
///
/// Returns a config error if the value is absent, empty, not an absolute
/// URL, has no host, or uses a scheme other than http/https.
pub fn parse_destination(destination: Option<&str>) -> Result<Url> {
    let raw = destination.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(error::config("destination URL is required"));
    }

    let url = Url::parse(raw)
        .map_err(|e| error::config(format!("invalid destination URL {raw:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(error::config(format!(
                "unsupported destination scheme {other:?}, expected http or https"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(error::config(format!("destination URL {raw:?} has no host")));
    }

    Ok(url)
}
