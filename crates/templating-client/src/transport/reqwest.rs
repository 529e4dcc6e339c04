//! Reqwest-based HTTP transport.

use std::sync::Arc;

use reqwest::Client;

use super::{ApiRequest, ApiResponse, ApiTransport, Method};
use crate::{ClientConfig, Error, Result, TRACING_TARGET_TRANSPORT};

/// Inner transport state that holds the HTTP client and configuration.
struct ReqwestTransportInner {
    http: Client,
    config: ClientConfig,
}

/// Reqwest-based transport for the templating API.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use templating_client::{ClientConfig, ReqwestTransport, TemplatingClient};
///
/// let config = ClientConfig::new("https://api.example.com/v1/my-app/".parse()?);
/// let transport = ReqwestTransport::new(config.clone())?;
/// let client = TemplatingClient::new(transport, config.base_url());
/// ```
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Arc<ReqwestTransportInner>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a new transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            timeout_ms = timeout.as_millis(),
            user_agent = %user_agent,
            "Creating reqwest transport"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message("Failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = ReqwestTransportInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait::async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut http_request = self
            .inner
            .http
            .request(Self::method(request.method), request.url)
            .header(reqwest::header::ACCEPT, "application/hal+json, application/json");

        if let Some(ref body) = request.body {
            http_request = http_request.json(body);
        }

        let http_response = http_request.send().await.map_err(from_reqwest)?;
        let status = http_response.status();
        let body = http_response.bytes().await.map_err(from_reqwest)?;

        if !status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET_TRANSPORT,
                status = status.as_u16(),
                "Request rejected by the API"
            );
            return Err(Error::from_status(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            ));
        }

        Ok(ApiResponse::new(status.as_u16(), body.to_vec()))
    }
}

fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout().with_message(e.to_string()).with_source(e)
    } else if e.is_connect() {
        Error::network_error()
            .with_message("Connection failed")
            .with_source(e)
    } else if e.is_decode() {
        Error::serialization().with_message(e.to_string()).with_source(e)
    } else {
        Error::network_error()
            .with_message(e.to_string())
            .with_source(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn config() -> ClientConfig {
        ClientConfig::new("http://127.0.0.1:9/v1/app".parse().unwrap())
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(config().with_timeout(5)).unwrap();
        assert_eq!(transport.config().http_timeout, 5);
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(ReqwestTransport::method(Method::Get), reqwest::Method::GET);
        assert_eq!(
            ReqwestTransport::method(Method::Delete),
            reqwest::Method::DELETE
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let transport = ReqwestTransport::new(config().with_timeout(2)).unwrap();
        let url = transport.config().base_url().join("templates").unwrap();

        let error = transport
            .send(ApiRequest::new(Method::Get, url))
            .await
            .unwrap_err();
        assert!(matches!(
            error.kind,
            ErrorKind::NetworkError | ErrorKind::Timeout
        ));
    }
}
