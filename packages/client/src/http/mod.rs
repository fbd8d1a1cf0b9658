pub mod request;
pub mod response;

pub use request::{OutboundRequest, RequestBuilder, build_request};
pub use response::{PhaseTimings, Response};
