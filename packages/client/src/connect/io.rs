use tokio::io::{AsyncRead, AsyncWrite};

/// Byte stream the transport can layer TLS and HTTP over.
pub trait Io: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> Io for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// Type-erased stream: raw TCP, TLS to the proxy, or TLS inside a tunnel.
pub type BoxedIo = Box<dyn Io>;
