//! HTTP request descriptors, client construction, and response handling.
mod builders;
mod client;
mod execution;
mod request;


pub use builders::build_request_specs;
pub use execution::{Exchange, Probe};
pub use request::RequestSpec;

pub(crate) use client::build_client;
pub(crate) use execution::{collect_exchange, drain_response_body};

#[cfg(test)]
pub(crate) use client::DEFAULT_USER_AGENT;
