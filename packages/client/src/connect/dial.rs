//! TCP connection to the proxy

use std::time::Duration;

use tokio::net::TcpStream;

use crate::error::{self, Result, TimedOut};
use crate::proxy::ProxyTarget;

/// Open a TCP stream to `proxy`, bounded by `connect_timeout`.
///
/// # Errors
///
/// Returns a dial error if the proxy cannot be resolved or reached in time.
pub async fn dial(proxy: &ProxyTarget, connect_timeout: Duration) -> Result<TcpStream> {
    tracing::debug!("Connecting to proxy {}", proxy.authority());

    let stream = tokio::time::timeout(
        connect_timeout,
        TcpStream::connect((proxy.host(), proxy.port())),
    )
    .await
    .map_err(|_| error::dial(TimedOut))?
    .map_err(error::dial)?;

    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY on proxy stream: {}", e);
    }

    Ok(stream)
}
