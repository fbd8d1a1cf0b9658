//! Proxy endpoint and credential types

pub mod credentials;
pub mod target;

pub use credentials::Credentials;
pub use target::{ProxyScheme, ProxyTarget};
