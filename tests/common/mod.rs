// common/mod.rs
//! Shared fixture for the integration suite: the canned payloads served by
//! the mock endpoint and the transport matrix every scenario runs across.

use serde::{Deserialize, Serialize};

use workitem_rest::{ReqwestTransport, RestWorkItemHandler, UreqTransport};

pub const HELLO_BODY: &str = "Hello from REST";

/// Two-field shape served by the person routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "person")]
pub struct Person {
    pub name: String,
    pub age: i32,
}

/// Canned XML document the mock endpoint serves: declaration included,
/// fields in the server's order (age before name).
pub fn person_xml(name: &str, age: i32) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <person><age>{}</age><name>{}</name></person>",
        age, name
    )
}

pub fn person_json(name: &str, age: i32) -> String {
    format!("{{\"name\":\"{}\",\"age\":{}}}", name, age)
}

/// Both back-ends, labelled. Scenarios loop over the matrix so the two
/// transports are held to identical outcomes.
pub fn handlers() -> Vec<(&'static str, RestWorkItemHandler)> {
    vec![
        ("reqwest", RestWorkItemHandler::with_transport(Box::new(ReqwestTransport::new()))),
        ("ureq", RestWorkItemHandler::with_transport(Box::new(UreqTransport::new()))),
    ]
}

pub fn ok_msg(url: &str) -> String {
    format!("request to endpoint {} successfully completed OK", url)
}

pub fn unreachable_msg(url: &str) -> String {
    format!("endpoint {} could not be reached: ", url)
}
