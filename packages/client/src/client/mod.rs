//! The proxy transport

pub mod core;

pub use self::core::ProxyTransport;
