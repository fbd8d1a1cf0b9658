//! Basic authentication utilities

use std::io::Write;

use base64::prelude::BASE64_STANDARD;
use base64::write::EncoderWriter;
use http::HeaderValue;

use crate::error::{self, Result};

/// Build a `Basic` credential header value from `username:password`.
///
/// The value is flagged sensitive so it is elided from debug output.
///
/// # Errors
///
/// Returns a config error if the credentials cannot form a header value.
pub fn basic_auth<U, P>(username: U, password: P) -> Result<HeaderValue>
where
    U: std::fmt::Display,
    P: std::fmt::Display,
{
    let mut buf = b"Basic ".to_vec();
    {
        let mut encoder = EncoderWriter::new(&mut buf, &BASE64_STANDARD);
        write!(encoder, "{username}:{password}").map_err(error::config)?;
        encoder.finish().map_err(error::config)?;
    }
    let mut header = HeaderValue::from_bytes(&buf)
        .map_err(|_e| error::config("invalid proxy authorization header"))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_user_and_password() {
        let value = basic_auth("alice", "s3cret").unwrap();
        assert_eq!(value, "Basic YWxpY2U6czNjcmV0");
        assert!(value.is_sensitive());
    }

    #[test]
    fn colon_in_password_is_kept() {
        let value = basic_auth("user", "pa:ss").unwrap();
        assert_eq!(value, "Basic dXNlcjpwYTpzcw==");
    }
}
