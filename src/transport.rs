// transport.rs

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use crate::error::TransportError;

/// HTTP verbs the adapter supports. Anything else is rejected before a
/// request is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Case-insensitive parse restricted to the supported verb set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry a request body.
    pub fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully resolved outgoing request, described as plain data.
///
/// The URL is absolute and carries any query string verbatim; the body is
/// already charset-encoded. Timeouts travel with the request so back-ends
/// can apply them per call.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

/// The raw reply a back-end hands back to the adapter.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Strategy seam over the HTTP back-end.
///
/// Implementations perform one blocking round trip and return non-2xx
/// statuses as data; `Err` is reserved for transport-level failures. The
/// back-end is chosen at handler construction, so concurrent invocations
/// never share mutable state.
pub trait Transport: Send + Sync {
    fn send(&self, request: &WireRequest) -> Result<WireResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("Post"), Some(Method::Post));
        assert_eq!(Method::parse(" DELETE "), Some(Method::Delete));
    }

    #[test]
    fn parse_rejects_unsupported_verbs() {
        assert_eq!(Method::parse("HEAD"), None);
        assert_eq!(Method::parse("PATCH"), None);
        assert_eq!(Method::parse(""), None);
    }

    #[test]
    fn only_post_and_put_carry_a_body() {
        assert!(Method::Post.allows_body());
        assert!(Method::Put.allows_body());
        assert!(!Method::Get.allows_body());
        assert!(!Method::Delete.allows_body());
    }
}
