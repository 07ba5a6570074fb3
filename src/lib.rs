// lib.rs
//! REST invocation adapter for process work items.
//!
//! A process step declares one HTTP call through named parameters (`Url`,
//! `Method`, `ContentType`, ...); the adapter performs the call through a
//! pluggable blocking transport and returns a normalized outcome, or a
//! structured error when the step opts into strict error propagation.

pub mod constants;
mod content;
mod error;
mod handler;
mod params;
mod transport;
mod transport_reqwest;
mod transport_ureq;

pub use error::{HandlerError, RestServiceError, TransportError};
pub use handler::{Outcome, RestWorkItemHandler};
pub use params::{ParamValue, Params, XmlContent};
pub use transport::{Method, Transport, WireRequest, WireResponse};
pub use transport_reqwest::ReqwestTransport;
pub use transport_ureq::UreqTransport;
