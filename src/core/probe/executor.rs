//! Probe Executor
//!
//! One bounded-time attempt against one URL. Every failure mode is a
//! `ProbeOutcome` value; nothing here returns an error to the caller.

use crate::core::probe::client::ProbeClient;
use crate::core::probe::types::{ProbeMethod, ProbeOutcome, TransportError};
use std::time::Duration;

/// Execute a single probe attempt and classify it
///
/// # Arguments
/// * `client` - Shared transport
/// * `url` - Normalized URL
/// * `method` - HEAD or GET
/// * `timeout` - Overall deadline for this call
///
/// # Behavior
/// - 2xx → `Success`, 3xx → `RedirectSuccess`, other statuses → `HttpFailure`
/// - Resolution failures → `DnsFailure`
/// - Deadline exceeded (by the transport or by the outer guard) → `TimeoutFailure`
/// - Any other transport failure → `OtherFailure`
pub async fn probe(
    client: &dyn ProbeClient,
    url: &str,
    method: ProbeMethod,
    timeout: Duration,
) -> ProbeOutcome {
    // The transport enforces the deadline too; the guard covers clients that don't
    match tokio::time::timeout(timeout, client.send(url.to_string(), method, timeout)).await {
        Ok(Ok(response)) => ProbeOutcome::from_status(response.status_code),
        Ok(Err(error)) => classify_transport_error(&error),
        Err(_elapsed) => ProbeOutcome::TimeoutFailure,
    }
}

/// Map a transport failure onto a probe outcome
pub fn classify_transport_error(error: &TransportError) -> ProbeOutcome {
    match error {
        TransportError::NameResolution => ProbeOutcome::DnsFailure,
        TransportError::Timeout => ProbeOutcome::TimeoutFailure,
        TransportError::Connection(_) | TransportError::Tls(_) | TransportError::Other(_) => {
            ProbeOutcome::OtherFailure
        }
    }
}
