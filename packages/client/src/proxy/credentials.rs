use std::fmt;

use http::HeaderValue;
use zeroize::Zeroize;

use crate::auth::basic_auth;
use crate::error::Result;

/// Username and password for the proxy.
///
/// The password is wiped from memory on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Pair up optional command-line values.
    ///
    /// Both halves must be present and non-empty. A lone username or password
    /// yields `None` so that no malformed `Proxy-Authorization` is ever sent.
    #[must_use]
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self::new(username, password))
            }
            (None | Some(""), None | Some("")) => None,
            _ => {
                tracing::warn!(
                    "only one of proxy username/password was supplied, sending no proxy credentials"
                );
                None
            }
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Basic <base64(username:password)>`, marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns a config error if the encoded value is not a valid header.
    pub fn to_header_value(&self) -> Result<HeaderValue> {
        basic_auth(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
