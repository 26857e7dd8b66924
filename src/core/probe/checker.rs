//! Reachability Checker
//!
//! Two-attempt policy for a single endpoint:
//! - HEAD first, reachable answers end the check immediately
//! - GET fallback for every other HEAD outcome (some servers reject HEAD)
//! - The last attempt made decides the terminal status

use crate::core::probe::client::ProbeClient;
use crate::core::probe::config::ProbeOptions;
use crate::core::probe::debug_logger::get_debug_logger;
use crate::core::probe::executor::probe;
use crate::core::probe::types::{CheckReport, ProbeMethod, ProbeOutcome, ReachabilityStatus};
use crate::core::probe::url::normalize_locator;
use std::time::Instant;

/// Check one locator and return its terminal status
///
/// Never fails: every path ends in `Online` or `Offline(reason)`. When both
/// attempts fail, the GET attempt's reason is reported.
pub async fn check(
    locator: &str,
    options: &ProbeOptions,
    client: &dyn ProbeClient,
) -> ReachabilityStatus {
    check_detailed(locator, options, client).await.status
}

/// Check one locator and keep the outcome of every attempt
///
/// # Behavior
/// 1. Normalize the locator once
/// 2. HEAD; `Success`/`RedirectSuccess` → `Online` without a second request
/// 3. Otherwise GET (unless `fallback_to_get` is off), strictly after HEAD completed
/// 4. Map the final attempt's outcome to the terminal status
pub async fn check_detailed(
    locator: &str,
    options: &ProbeOptions,
    client: &dyn ProbeClient,
) -> CheckReport {
    let debug_logger = get_debug_logger();
    let correlation_id = format!("check_{}", uuid::Uuid::new_v4());
    let start = Instant::now();
    let url = normalize_locator(locator);

    let head = attempt(client, &url, ProbeMethod::Head, options, &correlation_id).await;

    let get = if head.is_reachable() || !options.fallback_to_get {
        None
    } else {
        Some(attempt(client, &url, ProbeMethod::Get, options, &correlation_id).await)
    };

    let status = get.unwrap_or(head).to_status();

    let report = CheckReport {
        url,
        status,
        head,
        get,
        elapsed: start.elapsed(),
    };
    debug_logger.check_complete(&report, &correlation_id);
    report
}

async fn attempt(
    client: &dyn ProbeClient,
    url: &str,
    method: ProbeMethod,
    options: &ProbeOptions,
    correlation_id: &str,
) -> ProbeOutcome {
    let debug_logger = get_debug_logger();
    let start = Instant::now();
    debug_logger.probe_start(url, method, options.timeout.as_millis() as u64, correlation_id);

    let outcome = probe(client, url, method, options.timeout).await;

    debug_logger.probe_end(method, &outcome, start.elapsed().as_millis() as u64, correlation_id);
    outcome
}
