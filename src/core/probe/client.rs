//! Probe Client Implementations
//!
//! Provides the HTTP transport abstraction used by the probe executor:
//! one request per call, status code only, no retries.

use crate::core::probe::types::{ProbeError, ProbeMethod, TransportError};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "network")]
use isahc::config::{Configurable, RedirectPolicy};
#[cfg(feature = "network")]
use isahc::error::ErrorKind;
#[cfg(feature = "network")]
use isahc::{HttpClient, Request};

/// Maximum redirects followed when redirect following is enabled
pub const MAX_REDIRECTS: u32 = 10;

/// Response data a probe needs
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    /// HTTP status code of the final response
    pub status_code: u16,
    /// Time until response headers arrived
    pub duration: Duration,
}

/// HTTP transport for probe attempts
///
/// Implementations must be safe to share across concurrent checks: one
/// endpoint's request must never affect another's.
#[async_trait::async_trait]
pub trait ProbeClient: Send + Sync {
    /// Issue exactly one request and return once response headers arrive
    ///
    /// # Arguments
    /// * `url` - Fully qualified URL (already normalized)
    /// * `method` - HEAD or GET
    /// * `timeout` - Deadline for connect + response headers
    ///
    /// # Returns
    /// * `Ok(ProbeResponse)` - Server answered (any status code)
    /// * `Err(TransportError)` - No HTTP response was obtained
    async fn send(
        &self,
        url: String,
        method: ProbeMethod,
        timeout: Duration,
    ) -> Result<ProbeResponse, TransportError>;
}

/// Transport settings for the production client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Follow up to `MAX_REDIRECTS` redirects
    pub follow_redirects: bool,
    /// Honour proxy environment variables (`http_proxy`, `https_proxy`, ...)
    pub use_system_proxy: bool,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            follow_redirects: true,
            use_system_proxy: true,
            user_agent: format!("pingcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Production probe client implementation using isahc
#[cfg(feature = "network")]
pub struct IsahcProbeClient {
    client: HttpClient,
}

#[cfg(feature = "network")]
#[async_trait::async_trait]
impl ProbeClient for IsahcProbeClient {
    async fn send(
        &self,
        url: String,
        method: ProbeMethod,
        timeout: Duration,
    ) -> Result<ProbeResponse, TransportError> {
        let start = Instant::now();

        let builder = match method {
            ProbeMethod::Head => Request::head(&url),
            ProbeMethod::Get => Request::get(&url),
        };
        let request = builder
            .timeout(timeout)
            .body(())
            .map_err(|e| TransportError::Other(format!("Probe request creation failed: {}", e)))?;

        // Body is never read: dropping the response aborts the transfer
        let response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| classify_isahc_error(&e))?;

        Ok(ProbeResponse {
            status_code: response.status().as_u16(),
            duration: start.elapsed(),
        })
    }
}

#[cfg(feature = "network")]
impl IsahcProbeClient {
    pub fn new() -> Result<Self, ProbeError> {
        Self::with_options(&ClientOptions::default())
    }

    pub fn with_options(options: &ClientOptions) -> Result<Self, ProbeError> {
        let redirect_policy = if options.follow_redirects {
            RedirectPolicy::Limit(MAX_REDIRECTS)
        } else {
            RedirectPolicy::None
        };

        let mut builder = HttpClient::builder()
            .redirect_policy(redirect_policy)
            .default_header("User-Agent", options.user_agent.as_str());
        if !options.use_system_proxy {
            builder = builder.proxy(None);
        }

        let client = builder
            .build()
            .map_err(|e| ProbeError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Map an isahc failure onto the transport taxonomy
#[cfg(feature = "network")]
fn classify_isahc_error(error: &isahc::Error) -> TransportError {
    match error.kind() {
        ErrorKind::NameResolution => TransportError::NameResolution,
        ErrorKind::Timeout => TransportError::Timeout,
        ErrorKind::ConnectionFailed => TransportError::Connection(error.to_string()),
        ErrorKind::TlsEngine | ErrorKind::BadServerCertificate | ErrorKind::BadClientCertificate => {
            TransportError::Tls(error.to_string())
        }
        _ => TransportError::Other(error.to_string()),
    }
}

/// Mock probe client used when the network feature is disabled
#[cfg(not(feature = "network"))]
#[derive(Default)]
pub struct MockProbeClient;

#[cfg(not(feature = "network"))]
#[async_trait::async_trait]
impl ProbeClient for MockProbeClient {
    async fn send(
        &self,
        _url: String,
        _method: ProbeMethod,
        _timeout: Duration,
    ) -> Result<ProbeResponse, TransportError> {
        let start = Instant::now();
        Ok(ProbeResponse {
            status_code: 200,
            duration: start.elapsed(),
        })
    }
}

/// Build the client for the enabled transport
#[cfg(feature = "network")]
pub fn default_client(options: &ClientOptions) -> Result<Arc<dyn ProbeClient>, ProbeError> {
    Ok(Arc::new(IsahcProbeClient::with_options(options)?))
}

/// Build the client for the enabled transport
#[cfg(not(feature = "network"))]
pub fn default_client(_options: &ClientOptions) -> Result<Arc<dyn ProbeClient>, ProbeError> {
    Ok(Arc::new(MockProbeClient))
}
