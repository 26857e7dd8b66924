use super::types::{default_timeout_ms, Config};
use crate::core::probe::client::ClientOptions;
use crate::core::probe::types::Endpoint;

/// Built-in endpoint list, including one guaranteed-offline entry
pub fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("Google", "google.com"),
        Endpoint::new("GitHub", "github.com"),
        Endpoint::new("Stack Overflow", "stackoverflow.com"),
        Endpoint::new("YouTube", "youtube.com"),
        Endpoint::new("Should be offline", "example.invalid"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        let client = ClientOptions::default();
        Config {
            timeout_ms: default_timeout_ms(),
            fallback_to_get: true,
            follow_redirects: client.follow_redirects,
            use_system_proxy: client.use_system_proxy,
            user_agent: client.user_agent,
            endpoints: default_endpoints(),
        }
    }
}
