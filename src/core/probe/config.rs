//! Probe configuration

use std::time::Duration;

/// Default per-attempt deadline
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Options governing every reachability check
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOptions {
    /// Deadline for each individual attempt (connect + response headers)
    /// Default: 5s
    pub timeout: Duration,

    /// Retry with GET when the HEAD attempt is not reachable
    /// Default: true (some servers reject HEAD but accept GET)
    pub fallback_to_get: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            fallback_to_get: true,
        }
    }
}

impl ProbeOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Single HEAD attempt per endpoint
    pub fn head_only() -> Self {
        Self {
            fallback_to_get: false,
            ..Self::default()
        }
    }
}
