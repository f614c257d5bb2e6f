use tracing::{debug, warn};

use crate::error::RunError;
use crate::http::{RequestSpec, build_client, drain_response_body};

use super::settings::Settings;

/// Issues one untimed request on a throwaway client so connection, DNS and
/// TLS setup happen before the measured window. Any HTTP status counts as
/// success.
///
/// # Errors
///
/// Returns [`RunError::WarmupFailed`] when the client cannot be built or the
/// request fails at the transport level.
pub(super) async fn warm_up(settings: &Settings, request: &RequestSpec) -> Result<(), RunError> {
    let client =
        build_client(settings.timeout).map_err(|err| RunError::WarmupFailed { source: err })?;
    let response = client.execute(request.to_request()).await.map_err(|err| {
        warn!("Warm-up request to {} failed: {}", request.url(), err);
        RunError::WarmupFailed { source: err }
    })?;
    let status = response.status();
    if let Err(err) = drain_response_body(response).await {
        debug!("Warm-up body read failed: {}", err);
    }
    debug!("Warm-up request to {} returned {}", request.url(), status);
    Ok(())
}
