use std::fmt;

/// A marker type to indicate that an operation timed out.
#[derive(Debug)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out")
    }
}

impl std::error::Error for TimedOut {}

/// The proxy answered CONNECT without granting the tunnel.
///
/// Carries the challenge from `Proxy-Authenticate`, when the proxy sent one.
#[derive(Debug)]
pub struct TunnelRefused {
    pub challenge: Option<String>,
}

impl fmt::Display for TunnelRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.challenge {
            Some(challenge) => write!(f, "tunnel refused, proxy requires: {challenge}"),
            None => f.write_str("tunnel refused"),
        }
    }
}

impl std::error::Error for TunnelRefused {}
