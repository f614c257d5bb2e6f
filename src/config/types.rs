use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parse_duration_arg};
use crate::error::{AppError, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "urls")]
    pub url: Option<UrlList>,
    pub method: Option<HttpMethod>,
    pub post: Option<bool>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    #[serde(alias = "thread")]
    pub threads: Option<usize>,
    #[serde(alias = "request")]
    pub requests: Option<usize>,
    pub wait: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub warm: Option<bool>,
    pub print_latencies: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub skip_errors: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// A single URL or a list of URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlList {
    One(String),
    Many(Vec<String>),
}

impl UrlList {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UrlList::One(url) => vec![url],
            UrlList::Many(urls) => urls,
        }
    }
}

/// Durations in config files: an integer number of seconds or a suffixed
/// string such as `"150ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text).map_err(|err| match err {
                AppError::Validation(source) => source,
                other => ValidationError::InvalidDurationFormat {
                    value: other.to_string(),
                },
            }),
        }
    }
}
