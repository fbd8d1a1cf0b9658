//! Fluent API for fetching through a proxy
//!
//! `ProxyFetch` gathers the proxy specifier, credentials, headers and
//! transport settings, then resolves and sends everything in one call.

pub mod auth;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::ProxyFetch;
pub use methods::Prepared;
