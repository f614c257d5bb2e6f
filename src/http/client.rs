use std::time::Duration;

use reqwest::Client;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("kurl/", env!("CARGO_PKG_VERSION"));

/// Builds one private client. Every worker and the warm-up prober call this
/// separately so no connection pool is shared between them.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
