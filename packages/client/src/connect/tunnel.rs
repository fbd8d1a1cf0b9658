//! HTTP CONNECT tunnel establishment
//!
//! Every header on the outbound request is written on the CONNECT request
//! itself, `Proxy-Authorization` included. Transports that send a bare
//! CONNECT lose the credentials and the proxy answers 403/407.

use http::header::{HOST, PROXY_AUTHENTICATE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{self, Result, TunnelRefused};

/// Upper bound on the proxy's CONNECT response head.
pub const MAX_CONNECT_RESPONSE_BYTES: usize = 64 * 1024;

/// The proxy's answer to a granted CONNECT.
#[derive(Debug, Clone)]
pub struct ConnectResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

/// Render the CONNECT request for `authority`.
///
/// `Host` is set to the tunnel authority; all other `headers` are copied
/// verbatim in order.
#[must_use]
pub fn connect_preamble(authority: &str, headers: &HeaderMap) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + headers.len() * 32);
    buf.extend_from_slice(b"CONNECT ");
    buf.extend_from_slice(authority.as_bytes());
    buf.extend_from_slice(b" HTTP/1.1\r\nHost: ");
    buf.extend_from_slice(authority.as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (name, value) in headers {
        if name == HOST {
            continue;
        }
        buf.extend_from_slice(title_case(name).as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Send CONNECT over `stream` and wait for the proxy to grant the tunnel.
///
/// On success `stream` is positioned at the first tunneled byte.
///
/// # Errors
///
/// - dial error if the CONNECT request cannot be written
/// - proxy auth error if the proxy answers non-2xx, sends a malformed
///   status line, or closes the stream before answering
/// - request error if the proxy sends tunneled bytes before the client
pub async fn establish_tunnel<S>(
    stream: &mut S,
    authority: &str,
    headers: &HeaderMap,
) -> Result<ConnectResponse>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    tracing::debug!(
        authenticated = headers.contains_key(http::header::PROXY_AUTHORIZATION),
        "Sending CONNECT {}",
        authority
    );

    stream
        .write_all(&connect_preamble(authority, headers))
        .await
        .map_err(error::dial)?;
    stream.flush().await.map_err(error::dial)?;

    let mut reader = BufReader::new(stream);
    let mut limited = (&mut reader).take(MAX_CONNECT_RESPONSE_BYTES as u64);

    let mut line = String::new();
    read_head_line(&mut limited, &mut line, "status line").await?;
    let status_line = line.trim_end().to_string();
    let status = parse_status_line(&status_line)?;

    let mut headers = HeaderMap::new();
    loop {
        line.clear();
        read_head_line(&mut limited, &mut line, "headers").await?;
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        match parse_header(header) {
            Some((name, value)) => {
                headers.append(name, value);
            }
            None => tracing::debug!("Ignoring malformed CONNECT response header: {:?}", header),
        }
    }

    if !status.is_success() {
        let challenge = headers
            .get(PROXY_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        tracing::debug!("Proxy refused CONNECT {}: {}", authority, status_line);
        return Err(error::proxy_auth(
            Some(status),
            status_line,
            TunnelRefused { challenge },
        ));
    }

    if !reader.buffer().is_empty() {
        return Err(error::request(
            "proxy sent tunneled data before the client handshake",
        ));
    }

    tracing::info!("CONNECT tunnel established to {} ({})", authority, status_line);
    Ok(ConnectResponse { status, headers })
}

async fn read_head_line<R>(reader: &mut R, line: &mut String, what: &str) -> Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let read = reader.read_line(line).await.map_err(|e| {
        error::proxy_auth(None, "<no response>", format!("failed to read CONNECT {what}: {e}"))
    })?;

    if read == 0 || !line.ends_with('\n') {
        let reason = if read != 0 {
            format!(
                "CONNECT response {what} truncated or larger than {MAX_CONNECT_RESPONSE_BYTES} bytes"
            )
        } else {
            format!("proxy closed the connection while sending CONNECT {what}")
        };
        return Err(error::proxy_auth(None, "<no response>", reason));
    }

    Ok(())
}

fn parse_status_line(line: &str) -> Result<StatusCode> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let code = parts.next().unwrap_or_default();

    if !version.starts_with("HTTP/1.") {
        return Err(error::proxy_auth(
            None,
            line,
            format!("malformed CONNECT status line {line:?}"),
        ));
    }

    StatusCode::from_bytes(code.as_bytes()).map_err(|e| {
        error::proxy_auth(None, line, format!("malformed CONNECT status code {code:?}: {e}"))
    })
}

fn parse_header(line: &str) -> Option<(HeaderName, HeaderValue)> {
    let (name, value) = line.split_once(':')?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).ok()?;
    let value = HeaderValue::from_str(value.trim()).ok()?;
    Some((name, value))
}

/// `proxy-authorization` -> `Proxy-Authorization`
fn title_case(name: &HeaderName) -> String {
    let mut out = String::with_capacity(name.as_str().len());
    let mut upper = true;
    for c in name.as_str().chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        upper = c == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{PROXY_AUTHORIZATION, USER_AGENT};

    #[test]
    fn preamble_carries_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.test"));
        headers.insert(USER_AGENT, HeaderValue::from_static("proxyfetch/test"));
        headers.insert(
            PROXY_AUTHORIZATION,
            HeaderValue::from_static("Basic YWxpY2U6czNjcmV0"),
        );

        let preamble = String::from_utf8(connect_preamble("example.test:443", &headers)).unwrap();

        assert!(preamble.starts_with("CONNECT example.test:443 HTTP/1.1\r\n"));
        assert!(preamble.contains("\r\nHost: example.test:443\r\n"));
        assert!(!preamble.contains("Host: example.test\r\n"));
        assert!(preamble.contains("\r\nUser-Agent: proxyfetch/test\r\n"));
        assert!(preamble.contains("\r\nProxy-Authorization: Basic YWxpY2U6czNjcmV0\r\n"));
        assert!(preamble.ends_with("\r\n\r\n"));
    }

    #[test]
    fn status_line_parsing() {
        assert_eq!(
            parse_status_line("HTTP/1.1 200 Connection Established").unwrap(),
            StatusCode::OK
        );
        assert_eq!(parse_status_line("HTTP/1.0 200").unwrap(), StatusCode::OK);
        let err = parse_status_line("SSH-2.0-OpenSSH_9.6").unwrap_err();
        assert!(err.is_proxy_auth());
        assert_eq!(err.proxy_status(), None);
    }

    #[test]
    fn title_case_header_names() {
        assert_eq!(title_case(&PROXY_AUTHORIZATION), "Proxy-Authorization");
        assert_eq!(title_case(&HeaderName::from_static("x-trace-id")), "X-Trace-Id");
    }

    #[tokio::test]
    async fn refused_tunnel_surfaces_status_and_challenge() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let _ = server.read(&mut buf).await;
            let _ = server
                .write_all(
                    b"HTTP/1.1 407 Proxy Authentication Required\r\n\
                      Proxy-Authenticate: Basic realm=\"corp\"\r\n\r\n",
                )
                .await;
        });

        let err = establish_tunnel(&mut client, "example.test:443", &HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.proxy_status(), Some(StatusCode::PROXY_AUTHENTICATION_REQUIRED));
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("Basic realm=\"corp\""));
    }

    #[tokio::test]
    async fn eof_before_status_is_refusal() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let _ = server.read(&mut buf).await;
            drop(server);
        });

        let err = establish_tunnel(&mut client, "example.test:443", &HeaderMap::new())
            .await
            .unwrap_err();
        assert!(err.is_proxy_auth());
    }

    #[tokio::test]
    async fn early_tunnel_bytes_rejected() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 1024];
            let _ = server.read(&mut buf).await;
            let _ = server
                .write_all(b"HTTP/1.1 200 Connection Established\r\n\r\nsurprise")
                .await;
            let _ = server.read(&mut buf).await;
        });

        let err = establish_tunnel(&mut client, "example.test:443", &HeaderMap::new())
            .await
            .unwrap_err();
        assert!(err.is_request());
    }
}
