// transport_ureq.rs

use bytes::Bytes;
use log::debug;
use ureq::Agent;

use crate::error::TransportError;
use crate::transport::{Method, Transport, WireRequest, WireResponse};

type Result<T> = std::result::Result<T, TransportError>;

/// Compatibility back-end, built on ureq.
///
/// Kept alongside the reqwest back-end so hosts can pin the client stack
/// they already ship. Status-as-error is disabled so non-2xx replies come
/// back as data and the adapter stays in charge of status interpretation.
#[derive(Debug, Default, Clone, Copy)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        debug!("ureq {} {}", request.method, request.url);

        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(request.connect_timeout))
            .timeout_recv_response(Some(request.read_timeout))
            .timeout_recv_body(Some(request.read_timeout))
            .build()
            .new_agent();

        let result = match (request.method, request.body.as_deref()) {
            (Method::Get, _) => {
                let mut req = agent.get(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            (Method::Delete, _) => {
                let mut req = agent.delete(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            (Method::Post, body) => {
                let mut req = agent.post(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(bytes) => req.send(bytes),
                    None => req.send_empty(),
                }
            }
            (Method::Put, body) => {
                let mut req = agent.put(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(bytes) => req.send(bytes),
                    None => req.send_empty(),
                }
            }
        };

        let mut response = result?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.body_mut().read_to_vec()?;

        Ok(WireResponse { status, content_type, body: Bytes::from(body) })
    }
}
