//! # proxyfetch client
//!
//! Fetches a resource through an authenticated HTTP forward proxy.
//!
//! - `http://` destinations are forwarded with an absolute-form request line.
//! - `https://` destinations are reached through a CONNECT tunnel. The
//!   request's headers, `Proxy-Authorization` among them, are written on the
//!   CONNECT request itself, then a TLS session to the destination is
//!   negotiated over the tunnel.
//!
//! The pipeline is [`resolve`] → [`build_request`] → [`ProxyTransport::send`],
//! which drains the body into a [`Response`].
//!
//! ```no_run
//! use proxyfetch_client::prelude::*;
//!
//! # async fn run() -> proxyfetch_client::Result<()> {
//! let target = resolve(
//!     "http://127.0.0.1:9050",
//!     Some("https://example.test/"),
//!     Some("alice"),
//!     Some("s3cret"),
//! )?;
//! let request = build_request(&target.destination, target.credentials.as_ref())?;
//! let transport = ProxyTransport::new(ClientConfig::default())?;
//! let response = transport.send(request, &target.proxy).await?;
//! println!("code: {}", response.status_code());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod client;
pub mod config;
pub mod connect;
pub mod error;
pub mod http;
pub mod proxy;
pub mod tls;

pub mod prelude;

pub use crate::client::ProxyTransport;
pub use crate::config::{ClientConfig, ResolvedTarget, resolve};
pub use crate::error::{Error, Kind, Phase, Result};
pub use crate::http::{OutboundRequest, PhaseTimings, RequestBuilder, Response, build_request};
pub use crate::proxy::{Credentials, ProxyScheme, ProxyTarget};
