//! Streams to the proxy and CONNECT tunnel establishment

pub mod dial;
pub mod io;
pub mod tunnel;

pub use dial::dial;
pub use io::{BoxedIo, Io};
pub use tunnel::{ConnectResponse, MAX_CONNECT_RESPONSE_BYTES, connect_preamble, establish_tunnel};
