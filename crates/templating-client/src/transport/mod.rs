//! HTTP transport abstraction.
//!
//! The resource client never talks to the network directly; it hands fully
//! resolved [`ApiRequest`]s to an [`ApiTransport`]. The default transport is
//! [`ReqwestTransport`]; tests can plug in `MockTransport`.

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
mod reqwest;

use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, IntoStaticStr};
use url::Url;

#[cfg(any(test, feature = "test-utils"))]
pub use self::mock::MockTransport;
#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestTransport;
use crate::Result;

/// HTTP methods used by the templating API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// JSON body, if any. `DELETE` requests may carry one.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request without a body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful response returned by a transport.
///
/// Transports turn non-success statuses into errors, so an `ApiResponse`
/// always represents a 2xx answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status code and raw body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response with a JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// Creates a `204 No Content` response.
    pub fn no_content() -> Self {
        Self::new(204, Vec::new())
    }

    /// Returns `true` if the body is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Deserializes the body.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Returns the body as JSON, or `null` when it is empty.
    pub fn value(&self) -> Result<serde_json::Value> {
        if self.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        self.parse()
    }
}

/// Sends requests to the templating API.
///
/// Implementations map network failures and non-success statuses into
/// [`Error`](crate::Error) and must not retry.
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends a request and waits for the response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_ref(), "DELETE");
    }

    #[test]
    fn test_response_value() {
        assert_eq!(ApiResponse::no_content().value().unwrap(), serde_json::Value::Null);
        assert_eq!(
            ApiResponse::json(&json!({ "id": "a" })).value().unwrap(),
            json!({ "id": "a" })
        );
    }

    #[test]
    fn test_response_parse_error() {
        let error = ApiResponse::new(200, "not json")
            .parse::<serde_json::Value>()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }
}
