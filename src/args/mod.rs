//! CLI argument types and parsing helpers.
mod cli;
pub mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::KurlArgs;
pub use types::{HttpMethod, OutputFormat, PositiveUsize};

pub(crate) use parsers::{parse_duration_arg, parse_header};

#[cfg(test)]
pub(crate) use test_support::parse_test_args;
