// handler.rs

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::*;
use crate::content;
use crate::error::{HandlerError, RestServiceError};
use crate::params::{ParamValue, Params};
use crate::transport::{Method, Transport, WireRequest, WireResponse};
use crate::transport_reqwest::ReqwestTransport;

type Result<T> = std::result::Result<T, HandlerError>;

/// Normalized result of one invocation, written back into the process
/// context under the `Result`/`Status`/`StatusMsg` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<R> {
    /// Converted response body; present on success only.
    pub result: Option<R>,
    /// Numeric HTTP status, 0 when the endpoint was never reached.
    pub status: u16,
    /// Human-readable summary of how the call went.
    pub status_msg: String,
}

impl<R: Serialize> Outcome<R> {
    /// Render the outcome as the key/value bag the host result sink
    /// expects, keyed exactly `Result`, `Status` and `StatusMsg`.
    pub fn into_results(self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut results = serde_json::Map::new();
        if let Some(result) = self.result {
            let value = serde_json::to_value(result).map_err(|e| HandlerError::Marshal(e.to_string()))?;
            results.insert(RESULT_KEY.to_string(), value);
        }
        results.insert(STATUS_KEY.to_string(), self.status.into());
        results.insert(STATUS_MSG_KEY.to_string(), self.status_msg.into());
        Ok(results)
    }
}

/// The REST invocation adapter.
///
/// Stateless and synchronous: each call builds one HTTP request from the
/// supplied parameter bag, performs it through the configured transport and
/// interprets the response. Nothing is retained between calls, so one
/// handler may serve concurrent work items without locking.
pub struct RestWorkItemHandler {
    transport: Box<dyn Transport>,
}

impl Default for RestWorkItemHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the shared request/response phase, before result conversion.
enum Dispatched {
    /// 2xx reply that also passed Accept negotiation.
    Completed { response: WireResponse, url: String },
    /// Folded failure report: transport failure, remote HTTP error or
    /// negotiation failure, with the work item not opted into escalation.
    Report { status: u16, status_msg: String },
}

impl RestWorkItemHandler {
    /// Handler with the default reqwest back-end.
    pub fn new() -> Self {
        Self { transport: Box::new(ReqwestTransport::new()) }
    }

    /// Handler with an explicit transport strategy.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform the declared call and return the raw response body, decoded
    /// with the response's charset (UTF-8 when undeclared).
    pub fn execute(&self, params: &Params) -> Result<Outcome<String>> {
        Ok(match self.dispatch(params)? {
            Dispatched::Completed { response, url } => {
                let body = content::decode_body(&response.body, response.content_type.as_deref());
                Outcome {
                    result: Some(body),
                    status: response.status,
                    status_msg: completed_msg(&url, response.status),
                }
            }
            Dispatched::Report { status, status_msg } => Outcome { result: None, status, status_msg },
        })
    }

    /// Perform the declared call and unmarshal the response body into `T`
    /// according to the response's content type: JSON subtypes go through
    /// the JSON deserializer, everything else through the XML one.
    pub fn execute_as<T: DeserializeOwned>(&self, params: &Params) -> Result<Outcome<T>> {
        Ok(match self.dispatch(params)? {
            Dispatched::Completed { response, url } => {
                let text = content::decode_body(&response.body, response.content_type.as_deref());
                let value = unmarshal(&text, response.content_type.as_deref())?;
                Outcome {
                    result: Some(value),
                    status: response.status,
                    status_msg: completed_msg(&url, response.status),
                }
            }
            Dispatched::Report { status, status_msg } => Outcome { result: None, status, status_msg },
        })
    }

    /// Shared phase: validate parameters, build the request, perform it and
    /// classify the reply. Configuration errors surface before any I/O.
    fn dispatch(&self, params: &Params) -> Result<Dispatched> {
        let url = params.text(PARAM_URL).ok_or(HandlerError::MissingParameter(PARAM_URL))?;
        let method_text = params.text(PARAM_METHOD).ok_or(HandlerError::MissingParameter(PARAM_METHOD))?;
        let method = Method::parse(method_text)
            .ok_or_else(|| HandlerError::UnsupportedMethod(method_text.to_string()))?;
        let handle_errors = params.flag(PARAM_HANDLE_RESPONSE_ERRORS);

        let connect_timeout = params.millis_or(PARAM_CONNECT_TIMEOUT, DEFAULT_TIMEOUT_MS);
        let read_timeout = params.millis_or(PARAM_READ_TIMEOUT, DEFAULT_TIMEOUT_MS);

        let content_type = params.text(PARAM_CONTENT_TYPE).unwrap_or(DEFAULT_CONTENT_TYPE);
        let body = if method.allows_body() {
            build_request_body(params, content_type)?
        } else {
            None
        };

        let mut headers = Vec::new();
        if body.is_some() {
            headers.push((HTTP_HEADER_CONTENT_TYPE.to_string(), content_type.to_string()));
        }
        let accept = params.text(PARAM_ACCEPT_HEADER);
        if let Some(accept) = accept {
            headers.push((HTTP_HEADER_ACCEPT.to_string(), accept.to_string()));
        }

        let request = WireRequest {
            method,
            url: url.to_string(),
            headers,
            body,
            connect_timeout,
            read_timeout,
        };
        debug!("dispatching {} {}", method, url);

        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(err) => {
                error!("endpoint {} unreachable: {}", url, err.message());
                return if handle_errors {
                    Err(HandlerError::Service(RestServiceError::new(None, url, String::new())))
                } else {
                    Ok(Dispatched::Report { status: 0, status_msg: unreachable_msg(url, err.message()) })
                };
            }
        };

        if !response.is_success() {
            let body_text = content::decode_body(&response.body, response.content_type.as_deref());
            error!("endpoint {} answered {}", url, response.status);
            return if handle_errors {
                Err(HandlerError::Service(RestServiceError::new(Some(response.status), url, body_text)))
            } else {
                Ok(Dispatched::Report {
                    status: response.status,
                    status_msg: unreachable_msg(url, &body_text),
                })
            };
        }

        if let Some(accept) = accept {
            let acceptable = content::parse_mime(accept)
                .map(|wanted| content::accept_matches(&wanted, response.content_type.as_deref()))
                .unwrap_or(false);
            if !acceptable {
                error!("endpoint {} cannot serve {}", url, accept);
                return if handle_errors {
                    Err(HandlerError::Service(RestServiceError::new(Some(406), url, String::new())))
                } else {
                    Ok(Dispatched::Report { status: 406, status_msg: unreachable_msg(url, "") })
                };
            }
        }

        Ok(Dispatched::Completed { response, url: url.to_string() })
    }
}

/// Resolve the request body from the `Content` parameter. Structured
/// content is marshalled to XML when the content type is an XML type;
/// JSON content types never auto-marshal, so a structured value there is a
/// marshalling error. The resulting text is charset-encoded per the
/// content type's `charset` parameter.
fn build_request_body(params: &Params, content_type: &str) -> Result<Option<Vec<u8>>> {
    let value = match params.get(PARAM_CONTENT) {
        Some(value) => value,
        None => return Ok(None),
    };

    let mime_type = content::parse_mime(content_type);
    let charset = mime_type.as_ref().and_then(|m| m.get_param(mime::CHARSET)).map(|c| c.as_str());

    let text = match value {
        ParamValue::Text(text) => text.clone(),
        ParamValue::Structured(payload) => {
            let xml_type = mime_type.as_ref().map(content::is_xml).unwrap_or(false);
            if !xml_type {
                return Err(HandlerError::Marshal(format!(
                    "structured content requires an XML content type, got '{}'",
                    content_type
                )));
            }
            payload.to_xml()?
        }
    };

    Ok(Some(content::encode_body(&text, charset)))
}

/// Pick the deserializer from the response content type. JSON subtypes go
/// through serde_json; everything else falls back to the XML reader.
fn unmarshal<T: DeserializeOwned>(text: &str, content_type: Option<&str>) -> Result<T> {
    let json = content_type
        .and_then(content::parse_mime)
        .map(|m| content::is_json(&m))
        .unwrap_or(false);
    if json {
        serde_json::from_str(text).map_err(|e| HandlerError::Unmarshal(e.to_string()))
    } else {
        quick_xml::de::from_str(text).map_err(|e| HandlerError::Unmarshal(e.to_string()))
    }
}

fn completed_msg(url: &str, status: u16) -> String {
    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("OK");
    format!("request to endpoint {} successfully completed {}", url, reason)
}

fn unreachable_msg(url: &str, detail: &str) -> String {
    format!("endpoint {} could not be reached: {}", url, detail)
}
