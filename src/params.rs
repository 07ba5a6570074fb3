// params.rs

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::HandlerError;

/// Request content the adapter can marshal to XML when the declared content
/// type calls for it. Blanket-implemented for every serde-serializable
/// type, so callers hand over their own structs directly.
pub trait XmlContent: Send + Sync {
    fn to_xml(&self) -> Result<String, HandlerError>;
}

impl<T> XmlContent for T
where
    T: Serialize + Send + Sync,
{
    fn to_xml(&self) -> Result<String, HandlerError> {
        quick_xml::se::to_string(self).map_err(|e| HandlerError::Marshal(e.to_string()))
    }
}

/// A single named parameter value: plain text, or a structured object the
/// adapter marshals itself.
pub enum ParamValue {
    Text(String),
    Structured(Box<dyn XmlContent>),
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::Structured(_) => f.write_str("Structured(..)"),
        }
    }
}

/// The configuration bag a process step supplies for one REST invocation.
///
/// Keys are the work item parameter names (`Url`, `Method`, ...); insertion
/// order is irrelevant. The bag is created fresh per call and never shared
/// across invocations.
#[derive(Debug, Default)]
pub struct Params {
    values: HashMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a structured parameter, builder style.
    pub fn with_structured(mut self, key: impl Into<String>, value: impl XmlContent + 'static) -> Self {
        self.set_structured(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), ParamValue::Text(value.into()));
    }

    pub fn set_structured(&mut self, key: impl Into<String>, value: impl XmlContent + 'static) {
        self.values.insert(key.into(), ParamValue::Structured(Box::new(value)));
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Text value of a parameter; `None` when absent or structured.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParamValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Boolean parameter: `"true"` in any casing enables it, everything
    /// else (including absence) leaves it off.
    pub fn flag(&self, key: &str) -> bool {
        self.text(key).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
    }

    /// Millisecond parameter with a fallback: missing, empty and
    /// unparsable values all resolve to the default without erroring.
    pub fn millis_or(&self, key: &str, default_ms: u64) -> Duration {
        let ms = self
            .text(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn text_returns_only_text_values() {
        let params = Params::new().with(PARAM_URL, "http://localhost/test");
        assert_eq!(params.text(PARAM_URL), Some("http://localhost/test"));
        assert_eq!(params.text(PARAM_METHOD), None);
    }

    #[test]
    fn flag_accepts_any_casing_of_true() {
        let params = Params::new().with(PARAM_HANDLE_RESPONSE_ERRORS, "True");
        assert!(params.flag(PARAM_HANDLE_RESPONSE_ERRORS));

        let params = Params::new().with(PARAM_HANDLE_RESPONSE_ERRORS, "yes");
        assert!(!params.flag(PARAM_HANDLE_RESPONSE_ERRORS));

        assert!(!Params::new().flag(PARAM_HANDLE_RESPONSE_ERRORS));
    }

    #[test]
    fn millis_falls_back_on_empty_and_garbage() {
        let params = Params::new()
            .with(PARAM_CONNECT_TIMEOUT, "")
            .with(PARAM_READ_TIMEOUT, "not-a-number");
        assert_eq!(params.millis_or(PARAM_CONNECT_TIMEOUT, 5000), Duration::from_millis(5000));
        assert_eq!(params.millis_or(PARAM_READ_TIMEOUT, 5000), Duration::from_millis(5000));
        assert_eq!(params.millis_or("Absent", 5000), Duration::from_millis(5000));
    }

    #[test]
    fn millis_parses_valid_values() {
        let params = Params::new().with(PARAM_CONNECT_TIMEOUT, "30000");
        assert_eq!(params.millis_or(PARAM_CONNECT_TIMEOUT, 5000), Duration::from_millis(30000));
    }

    #[test]
    fn structured_values_marshal_to_xml() {
        #[derive(Serialize)]
        #[serde(rename = "person")]
        struct Person {
            name: String,
            age: i32,
        }

        let params = Params::new().with_structured(
            PARAM_CONTENT,
            Person { name: "john".to_string(), age: 25 },
        );
        match params.get(PARAM_CONTENT) {
            Some(ParamValue::Structured(content)) => {
                assert_eq!(content.to_xml().unwrap(), "<person><name>john</name><age>25</age></person>");
            }
            other => panic!("expected structured content, got {:?}", other),
        }
    }
}
