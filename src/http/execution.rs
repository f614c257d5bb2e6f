use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::debug;

/// A fully received response, handed to response tests.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// What a response test gets to look at after each request.
#[derive(Debug, Clone, Copy)]
pub enum Probe<'resp> {
    Response(&'resp Exchange),
    Failure(&'resp reqwest::Error),
}

impl Probe<'_> {
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Probe::Response(exchange) => Some(exchange.status),
            Probe::Failure(_) => None,
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Probe::Failure(_))
    }
}

pub(crate) async fn drain_response_body(
    response: reqwest::Response,
) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Reads the whole response into an [`Exchange`]. The status is already
/// known, so a body failure only leaves the body empty.
pub(crate) async fn collect_exchange(response: reqwest::Response) -> Exchange {
    let status = response.status();
    let headers = response.headers().clone();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            debug!("Failed to read response body: {}", err);
            Bytes::new()
        }
    };
    Exchange {
        status,
        headers,
        body,
    }
}
