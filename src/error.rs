// error.rs

use std::fmt;

/// Structured failure payload for an escalated remote error.
///
/// Carries the HTTP status (absent when the endpoint was never reached), the
/// target endpoint URL and the raw response body, which may be empty. Hosts
/// that opt into strict error propagation receive this through the
/// `source()` chain of [`HandlerError::Service`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServiceError {
    status: Option<u16>,
    endpoint: String,
    response: String,
}

impl RestServiceError {
    pub(crate) fn new(status: Option<u16>, endpoint: impl Into<String>, response: impl Into<String>) -> Self {
        Self { status, endpoint: endpoint.into(), response: response.into() }
    }

    /// HTTP status of the failed call; `None` for a pure transport failure.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Raw response body of the failed call, possibly empty.
    pub fn response(&self) -> &str {
        &self.response
    }
}

impl fmt::Display for RestServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "endpoint {} answered {}", self.endpoint, status),
            None => write!(f, "endpoint {} could not be reached", self.endpoint),
        }
    }
}

impl std::error::Error for RestServiceError {}

/// Transport-level failure: connection refused, timeout, DNS resolution.
#[derive(Debug)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(format!("request timed out: {}", err))
        } else {
            Self::new(err.to_string())
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Main error type for work item execution
#[derive(Debug)]
pub enum HandlerError {
    /// A mandatory parameter is absent from the parameter bag
    MissingParameter(&'static str),
    /// Method outside the supported GET/POST/PUT/DELETE set
    UnsupportedMethod(String),
    /// Structured request content could not be marshalled
    Marshal(String),
    /// Response body could not be unmarshalled into the requested type
    Unmarshal(String),
    /// Escalated transport or HTTP failure, raised when the work item opts
    /// into strict response-error handling
    Service(RestServiceError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter(key) => write!(f, "missing mandatory parameter '{}'", key),
            Self::UnsupportedMethod(method) => write!(f, "unsupported HTTP method '{}'", method),
            Self::Marshal(msg) => write!(f, "request content could not be marshalled: {}", msg),
            Self::Unmarshal(msg) => write!(f, "response could not be unmarshalled: {}", msg),
            Self::Service(err) => write!(f, "REST service invocation failed: {}", err),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}
