//! The types most callers need.

pub use crate::client::ProxyTransport;
pub use crate::config::{ClientConfig, ResolvedTarget, resolve};
pub use crate::error::{Error, Kind, Phase, Result};
pub use crate::http::{OutboundRequest, PhaseTimings, RequestBuilder, Response, build_request};
pub use crate::proxy::{Credentials, ProxyScheme, ProxyTarget};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};

// URL handling
pub use url::Url;
