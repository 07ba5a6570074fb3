// transport_reqwest.rs

use log::debug;
use reqwest::blocking::Client;

use crate::error::TransportError;
use crate::transport::{Method, Transport, WireRequest, WireResponse};

type Result<T> = std::result::Result<T, TransportError>;

/// Default back-end, built on reqwest's blocking client.
///
/// A client is constructed per call so the per-call connect/read timeouts
/// take effect; the transport itself holds no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        debug!("reqwest {} {}", request.method, request.url);

        let client = Client::builder()
            .connect_timeout(request.connect_timeout)
            .timeout(request.read_timeout)
            .build()?;

        let mut req = client.request(to_reqwest_method(request.method), request.url.as_str());
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.bytes()?;

        Ok(WireResponse { status, content_type, body })
    }
}
