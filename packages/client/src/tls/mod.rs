//! TLS for the proxy connection and the tunneled destination

pub mod tls_manager;
pub mod verifier;

pub use tls_manager::TlsManager;
pub use verifier::InsecureVerifier;
