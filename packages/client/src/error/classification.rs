use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind, Phase};

impl Error {
    /// Returns true if the error came from resolving configuration.
    ///
    /// No network activity happens before these errors are raised.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self.kind(), Kind::Config)
    }

    /// Returns true if the proxy could not be reached.
    #[must_use]
    pub fn is_dial(&self) -> bool {
        matches!(self.kind(), Kind::Dial)
    }

    /// Returns true if the proxy refused the CONNECT request.
    #[must_use]
    pub fn is_proxy_auth(&self) -> bool {
        matches!(self.kind(), Kind::ProxyAuth { .. })
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self.kind(), Kind::Tls)
    }

    /// Returns true if the error is related to the request
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self.kind(), Kind::Request)
    }

    /// Returns true if the response body ended early
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self.kind(), Kind::Read)
    }

    /// Returns true if the error is related to a timeout.
    ///
    /// This covers both the overall request budget and a proxy dial that
    /// exceeded its connect timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.kind(), Kind::Timeout(_)) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// Returns the status code the proxy answered CONNECT with, if any.
    #[must_use]
    pub fn proxy_status(&self) -> Option<http::StatusCode> {
        match self.kind() {
            Kind::ProxyAuth { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the phase of the exchange that failed.
    ///
    /// Configuration errors happen before any phase starts and return `None`.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        match self.kind() {
            Kind::Config => None,
            Kind::Dial => Some(Phase::Dial),
            Kind::ProxyAuth { .. } => Some(Phase::Connect),
            Kind::Tls => Some(Phase::Tls),
            Kind::Request | Kind::Read => Some(Phase::Exchange),
            Kind::Timeout(phase) => Some(*phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;

    #[test]
    fn phase_follows_kind() {
        assert_eq!(error::config("bad").phase(), None);
        assert_eq!(error::dial("refused").phase(), Some(Phase::Dial));
        assert_eq!(
            error::proxy_auth(None, "HTTP/1.1 407", "nope").phase(),
            Some(Phase::Connect)
        );
        assert_eq!(error::read("eof").phase(), Some(Phase::Exchange));
        assert_eq!(error::timeout(Phase::Tls).phase(), Some(Phase::Tls));
    }

    #[test]
    fn dial_timeout_counts_as_timeout() {
        let err = error::dial(TimedOut);
        assert!(err.is_dial());
        assert!(err.is_timeout());
        assert!(!error::dial(io::Error::from(io::ErrorKind::ConnectionRefused)).is_timeout());
    }

    #[test]
    fn proxy_status_is_exposed() {
        let err = error::proxy_auth(
            Some(http::StatusCode::PROXY_AUTHENTICATION_REQUIRED),
            "HTTP/1.1 407 Proxy Authentication Required",
            "denied",
        );
        assert!(err.is_proxy_auth());
        assert_eq!(
            err.proxy_status(),
            Some(http::StatusCode::PROXY_AUTHENTICATION_REQUIRED)
        );
        assert!(err.to_string().contains("407 Proxy Authentication Required"));
    }
}
