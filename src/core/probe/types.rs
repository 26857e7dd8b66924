// Core types for reachability probing
use std::collections::HashMap;
use std::time::Duration;

/// A named probe target
///
/// `locator` is either a bare host (`github.com`) or a full URL
/// (`https://github.com`). Endpoints are keyed downstream by their
/// normalized locator, so a probe set must not contain two endpoints that
/// normalize to the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub locator: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }

    /// Normalized URL used as this endpoint's status map key
    pub fn key(&self) -> String {
        super::url::normalize_locator(&self.locator)
    }
}

/// HTTP method used for a single probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
        }
    }
}

/// Classified result of one probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProbeOutcome {
    /// 2xx response
    Success(u16),
    /// 3xx response, counted as reachable
    RedirectSuccess(u16),
    /// Any other status code
    HttpFailure(u16),
    /// Host name could not be resolved
    DnsFailure,
    /// Attempt exceeded its deadline
    TimeoutFailure,
    /// Connection refused, TLS failure, reset, protocol error
    OtherFailure,
}

impl ProbeOutcome {
    /// Classify an HTTP status code
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            200..=299 => ProbeOutcome::Success(status_code),
            300..=399 => ProbeOutcome::RedirectSuccess(status_code),
            _ => ProbeOutcome::HttpFailure(status_code),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(
            self,
            ProbeOutcome::Success(_) | ProbeOutcome::RedirectSuccess(_)
        )
    }

    /// Terminal status this outcome maps to when it is the final attempt
    pub fn to_status(self) -> ReachabilityStatus {
        match self {
            ProbeOutcome::Success(_) | ProbeOutcome::RedirectSuccess(_) => {
                ReachabilityStatus::Online
            }
            ProbeOutcome::HttpFailure(code) => {
                ReachabilityStatus::Offline(OfflineReason::HttpStatus(code))
            }
            ProbeOutcome::DnsFailure => ReachabilityStatus::Offline(OfflineReason::DnsError),
            ProbeOutcome::TimeoutFailure => ReachabilityStatus::Offline(OfflineReason::Timeout),
            ProbeOutcome::OtherFailure => ReachabilityStatus::Offline(OfflineReason::Generic),
        }
    }

    /// Short machine-readable label for logs
    pub fn label(&self) -> String {
        match self {
            ProbeOutcome::Success(code) => format!("success_{}", code),
            ProbeOutcome::RedirectSuccess(code) => format!("redirect_{}", code),
            ProbeOutcome::HttpFailure(code) => format!("http_{}", code),
            ProbeOutcome::DnsFailure => "dns_error".to_string(),
            ProbeOutcome::TimeoutFailure => "timeout".to_string(),
            ProbeOutcome::OtherFailure => "connection_error".to_string(),
        }
    }
}

/// Why an endpoint is offline
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OfflineReason {
    /// Server answered with a non-success, non-redirect status
    HttpStatus(u16),
    DnsError,
    Timeout,
    Generic,
}

/// Externally visible per-endpoint status
///
/// Lifecycle: `Unknown` at batch start, `Checking` while the check runs,
/// then exactly one terminal value (`Online` or `Offline`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ReachabilityStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline(OfflineReason),
}

impl ReachabilityStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReachabilityStatus::Online | ReachabilityStatus::Offline(_)
        )
    }
}

/// Normalized locator -> status
pub type StatusMap = HashMap<String, ReachabilityStatus>;

/// Change notification broadcast on every status write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub locator: String,
    pub status: ReachabilityStatus,
}

/// Both attempts of one reachability check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Normalized URL that was probed
    pub url: String,
    /// Terminal status (decided by the last attempt made)
    pub status: ReachabilityStatus,
    /// HEAD attempt outcome
    pub head: ProbeOutcome,
    /// GET attempt outcome, absent when HEAD succeeded or fallback is disabled
    pub get: Option<ProbeOutcome>,
    /// Wall-clock time across all attempts
    pub elapsed: Duration,
}

impl CheckReport {
    pub fn used_fallback(&self) -> bool {
        self.get.is_some()
    }
}

/// Transport-level failure reported by a `ProbeClient`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("name resolution failed")]
    NameResolution,
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("TLS failure: {0}")]
    Tls(String),
    #[error("transport error: {0}")]
    Other(String),
}

/// Prober setup errors
///
/// Probe failures are never errors; these only cover misuse and setup.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("duplicate locator in endpoint set: {0}")]
    DuplicateLocator(String),
    #[error("failed to create probe client: {0}")]
    ClientInit(String),
}
