#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for resource client operations.
pub const TRACING_TARGET_CLIENT: &str = "templating_client::client";

/// Tracing target for transport operations.
pub const TRACING_TARGET_TRANSPORT: &str = "templating_client::transport";

mod client;
mod config;
mod error;
mod model;
mod options;
mod routes;

pub mod hal;
pub mod transport;

pub use templating_uri::{Params, UriTemplate, Value};

pub use crate::client::{BatchClient, TemplatingClient};
pub use crate::config::ClientConfig;
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::hal::{HalResource, Link, Links};
pub use crate::model::{Collection, Template};
pub use crate::options::{FindOptions, GetOptions, SortDirection};
pub use crate::routes::{BatchRoutes, TemplatingRoutes};
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub use crate::transport::ReqwestTransport;
pub use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method};
