//! Reachability Probing Module
//!
//! Concurrent host reachability checks with:
//! - Locator normalization (bare host → `https://host`)
//! - Bounded single attempts classified into a stable failure taxonomy
//! - HEAD first, GET fallback per endpoint
//! - Concurrent batches over a shared status map with change notifications

pub mod batch;
pub mod checker;
pub mod client;
pub mod config;
pub mod debug_logger;
pub mod executor;
pub mod types;
pub mod url;


// Re-export public API
pub use batch::BatchProber;
pub use checker::{check, check_detailed};
pub use client::{default_client, ClientOptions, ProbeClient, ProbeResponse};
pub use config::{ProbeOptions, DEFAULT_TIMEOUT_MS};
pub use debug_logger::{get_debug_logger, EnhancedDebugLogger};
pub use executor::probe;
pub use types::*;
pub use url::{extract_host, normalize_locator, validate_locator, UrlError};

// Re-export client implementations conditionally
#[cfg(feature = "network")]
pub use client::IsahcProbeClient;

#[cfg(not(feature = "network"))]
pub use client::MockProbeClient;
