//! Resource client for template resources.
//!
//! [`TemplatingClient`] wraps an [`ApiTransport`](crate::ApiTransport) and a
//! [`TemplatingRoutes`](crate::TemplatingRoutes) table; [`BatchClient`] groups
//! the batch operations.

mod batch;
mod templating;

pub use batch::BatchClient;
pub use templating::TemplatingClient;
