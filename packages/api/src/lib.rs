//! Fetch a URL through an authenticated HTTP forward proxy
//!
//! `https` destinations are reached through a CONNECT tunnel that carries the
//! request headers, `Proxy-Authorization` included; `http` destinations are
//! forwarded in absolute form.
//!
//! ```no_run
//! use proxyfetch::ProxyFetch;
//!
//! # async fn run() -> proxyfetch::Result<()> {
//! let response = ProxyFetch::new()
//!     .proxy("http://127.0.0.1:9050")
//!     .basic_auth("alice", "s3cret")
//!     .get("https://example.test/")
//!     .await?;
//! println!("{}", response.status_code());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod cli;

pub use builder::{Prepared, ProxyFetch};

pub use proxyfetch_client::{
    ClientConfig, Error, Kind, Phase, PhaseTimings, ProxyTarget, Response, Result,
};
