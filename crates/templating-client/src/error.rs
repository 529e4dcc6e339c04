//! Structured error handling for templating API operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in templating API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// Network-related error occurred.
    NetworkError,
    /// Authentication failed.
    Authentication,
    /// Authorization failed.
    Authorization,
    /// Rate limit exceeded.
    RateLimited,
    /// Service temporarily unavailable.
    ServiceUnavailable,
    /// Internal client error.
    InternalError,
    /// The API answered with a server error.
    ExternalError,
    /// Configuration error.
    Configuration,
    /// Resource or link relation not found.
    NotFound,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Classifies a non-success HTTP status code.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 | 410 => Self::NotFound,
            408 | 504 => Self::Timeout,
            429 => Self::RateLimited,
            502 | 503 => Self::ServiceUnavailable,
            400..=499 => Self::InvalidInput,
            500..=599 => Self::ExternalError,
            _ => Self::Unknown,
        }
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// HTTP status code, when the API answered.
    pub status: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates an error for a non-success HTTP response.
    pub fn from_status(status: u16, body: impl AsRef<str>) -> Self {
        let body = body.as_ref().trim();
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {body}")
        };

        let mut error = Self::new(ErrorKind::from_status(status)).with_message(message);
        error.status = Some(status);
        error
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

impl From<templating_uri::Error> for Error {
    fn from(error: templating_uri::Error) -> Self {
        Self::from_source(ErrorKind::InvalidInput, error).with_message("Invalid URI template")
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Self::from_source(ErrorKind::InvalidInput, error).with_message("Invalid URL")
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization()
            .with_message(error.to_string())
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.status.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::new(ErrorKind::Configuration)
            .with_message("bad config")
            .with_context("additional context");

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.message.as_deref(), Some("bad config"));
        assert_eq!(error.context.as_deref(), Some("additional context"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::not_found().with_message("missing 'put' link");

        let display_str = error.to_string();
        assert_eq!(display_str, "[not_found]: missing 'put' link");
        assert_eq!(Error::timeout().to_string(), "[timeout]");
    }

    #[test]
    fn test_from_status() {
        let error = Error::from_status(404, "  {\"message\":\"gone\"}\n");
        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.status, Some(404));
        assert_eq!(
            error.message.as_deref(),
            Some("HTTP 404: {\"message\":\"gone\"}")
        );

        let error = Error::from_status(500, "");
        assert_eq!(error.kind, ErrorKind::ExternalError);
        assert_eq!(error.message.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidInput);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Authorization);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::InvalidInput);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(504), ErrorKind::Timeout);
        assert_eq!(ErrorKind::from_status(302), ErrorKind::Unknown);
    }

    #[test]
    fn test_from_uri_error() {
        let error = Error::from(templating_uri::Error::EmptyExpression { offset: 0 });
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("not_found").unwrap(),
            ErrorKind::NotFound
        );
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert!(ErrorKind::from_str("invalid").is_err());
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
    }
}
