// Text rendering of reachability statuses
use crate::core::probe::types::{Endpoint, OfflineReason, ReachabilityStatus};

/// Renders statuses for terminal display
pub struct StatusRenderer {
    /// Fixed width for the name column in `render_row`
    name_width: usize,
}

impl StatusRenderer {
    pub fn new() -> Self {
        Self { name_width: 20 }
    }

    pub fn with_name_width(name_width: usize) -> Self {
        Self { name_width }
    }

    /// Render one status
    /// ✅/❌ mark terminal results; offline reasons are appended in parentheses
    /// when known (`HTTP 503`, `DNS error`, `Timeout`)
    pub fn render_status(&self, status: &ReachabilityStatus) -> String {
        match status {
            ReachabilityStatus::Unknown => "Unknown".to_string(),
            ReachabilityStatus::Checking => "Checking…".to_string(),
            ReachabilityStatus::Online => "Online ✅".to_string(),
            ReachabilityStatus::Offline(reason) => match reason {
                OfflineReason::HttpStatus(code) => format!("Offline ❌ (HTTP {})", code),
                OfflineReason::DnsError => "Offline ❌ (DNS error)".to_string(),
                OfflineReason::Timeout => "Offline ❌ (Timeout)".to_string(),
                OfflineReason::Generic => "Offline ❌".to_string(),
            },
        }
    }

    /// `name  url  status` on one line
    pub fn render_row(&self, endpoint: &Endpoint, status: &ReachabilityStatus) -> String {
        format!(
            "{:<width$} {:<40} {}",
            endpoint.name,
            endpoint.key(),
            self.render_status(status),
            width = self.name_width
        )
    }
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new()
    }
}
