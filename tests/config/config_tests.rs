use crate::common::create_temp_dir;
use pingcheck::config::{default_endpoints, Config, ConfigError};
use std::time::Duration;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert_eq!(config.timeout_ms, 5000);
    assert!(config.fallback_to_get);
    assert!(config.follow_redirects);
    assert_eq!(config.endpoints.len(), 5);
    assert_eq!(config.endpoints, default_endpoints());
    assert!(config.check().is_ok());
}

#[test]
fn test_default_endpoints_include_offline_entry() {
    let keys: Vec<String> = default_endpoints().iter().map(|e| e.key()).collect();

    assert!(keys.contains(&"https://github.com".to_string()));
    assert!(keys.contains(&"https://example.invalid".to_string()));
}

#[test]
fn test_parse_full_toml() {
    let config = Config::from_toml(
        r#"
timeout_ms = 1500
fallback_to_get = false
follow_redirects = false
use_system_proxy = true
user_agent = "probe-test/1.0"

[[endpoints]]
name = "Docs"
locator = "docs.rs"

[[endpoints]]
name = "Local"
locator = "http://127.0.0.1:8080/health"
"#,
    )
    .unwrap();

    assert_eq!(config.timeout_ms, 1500);
    assert!(!config.fallback_to_get);
    assert!(!config.follow_redirects);
    assert!(config.use_system_proxy);
    assert_eq!(config.user_agent, "probe-test/1.0");
    assert_eq!(config.endpoints.len(), 2);
    assert_eq!(config.endpoints[0].key(), "https://docs.rs");
    assert_eq!(config.endpoints[1].key(), "http://127.0.0.1:8080/health");
    assert!(config.check().is_ok());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = Config::from_toml("timeout_ms = 750\n").unwrap();
    let defaults = Config::default();

    assert_eq!(config.timeout_ms, 750);
    assert_eq!(config.fallback_to_get, defaults.fallback_to_get);
    assert!(config.use_system_proxy);
    assert_eq!(config.user_agent, defaults.user_agent);
    assert_eq!(config.endpoints, defaults.endpoints);
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = Config::from_toml("timeout_ms = \"soon\"");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_check_rejects_invalid_configs() {
    let cases = [
        (
            "zero timeout",
            "timeout_ms = 0\n",
        ),
        (
            "empty name",
            "endpoints = [{ name = \" \", locator = \"github.com\" }]\n",
        ),
        (
            "duplicate after normalization",
            "endpoints = [{ name = \"A\", locator = \"github.com\" }, { name = \"B\", locator = \"https://github.com\" }]\n",
        ),
        (
            "missing host",
            "endpoints = [{ name = \"Empty\", locator = \"\" }]\n",
        ),
    ];

    for (label, toml) in cases {
        let config = Config::from_toml(toml).unwrap();
        assert!(
            matches!(config.check(), Err(ConfigError::Invalid(_))),
            "{} should be invalid",
            label
        );
    }
}

#[test]
fn test_init_at_writes_once_and_round_trips() {
    let dir = create_temp_dir();
    let path = dir.path().join("nested").join("config.toml");

    assert!(Config::init_at(&path).unwrap());
    assert!(path.exists());
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    std::fs::write(&path, "timeout_ms = 42\n").unwrap();
    assert!(!Config::init_at(&path).unwrap());
    assert_eq!(Config::load_from(&path).unwrap().timeout_ms, 42);
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = create_temp_dir();

    let result = Config::load_from(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_option_mapping() {
    let config = Config::from_toml(
        "timeout_ms = 250\nfallback_to_get = false\nfollow_redirects = false\nuse_system_proxy = false\nuser_agent = \"ua\"\n",
    )
    .unwrap();

    let probe = config.probe_options();
    assert_eq!(probe.timeout, Duration::from_millis(250));
    assert!(!probe.fallback_to_get);

    let client = config.client_options();
    assert!(!client.follow_redirects);
    assert!(!client.use_system_proxy);
    assert_eq!(client.user_agent, "ua");
}

#[test]
fn test_locators_replace_endpoints_before_validation() {
    let mut config = Config::default();
    config.use_locators(&["docs.rs".to_string(), "http://127.0.0.1:9/health".to_string()]);

    assert_eq!(config.endpoints.len(), 2);
    assert_eq!(config.endpoints[0].name, "docs.rs");
    assert_eq!(config.endpoints[1].key(), "http://127.0.0.1:9/health");
    assert!(config.check().is_ok());

    config.use_locators(&["github.com".to_string(), "https://github.com".to_string()]);
    assert!(matches!(config.check(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_no_locators_keeps_configured_endpoints() {
    let mut config = Config::default();

    config.use_locators(&[]);

    assert_eq!(config.endpoints, default_endpoints());
}
