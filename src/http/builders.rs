use std::path::Path;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::args::KurlArgs;
use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::request::RequestSpec;

/// Builds one request descriptor per `--url`, in the order given.
///
/// # Errors
///
/// Returns an error when no URL is set, a URL is malformed or not http(s),
/// a header cannot be encoded, or the body file cannot be read.
pub fn build_request_specs(args: &KurlArgs) -> AppResult<Vec<RequestSpec>> {
    if args.urls.is_empty() {
        return Err(AppError::validation(ValidationError::MissingUrl));
    }

    let method = if args.post {
        Method::POST
    } else {
        Method::from(args.method)
    };
    let headers = build_headers(&args.headers)?;
    let body = args.body.as_deref().map(read_body).transpose()?;

    args.urls
        .iter()
        .map(|raw| {
            let url = parse_target_url(raw)?;
            let mut spec = RequestSpec::new(method.clone(), url).with_headers(headers.clone());
            if let Some(body) = body.as_ref() {
                spec = spec.with_body(body.clone());
            }
            Ok(spec)
        })
        .collect()
}

pub(super) fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::validation(ValidationError::UnsupportedScheme {
                url: raw.to_owned(),
            }));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}

pub(super) fn build_headers(pairs: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
        headers.append(name, header_value);
    }
    Ok(headers)
}

fn read_body(path: &str) -> AppResult<Bytes> {
    let file = Path::new(path);
    if !file.is_file() {
        return Err(AppError::validation(ValidationError::BodyFileMissing {
            path: path.to_owned(),
        }));
    }
    let bytes = std::fs::read(file).map_err(|err| {
        AppError::http(HttpError::ReadBody {
            path: file.to_path_buf(),
            source: err,
        })
    })?;
    Ok(Bytes::from(bytes))
}
