use pingcheck::core::probe::{Endpoint, OfflineReason, ReachabilityStatus};
use pingcheck::ui::StatusRenderer;

#[test]
fn test_render_status_strings() {
    let renderer = StatusRenderer::new();
    let cases = [
        (ReachabilityStatus::Unknown, "Unknown"),
        (ReachabilityStatus::Checking, "Checking…"),
        (ReachabilityStatus::Online, "Online ✅"),
        (
            ReachabilityStatus::Offline(OfflineReason::HttpStatus(503)),
            "Offline ❌ (HTTP 503)",
        ),
        (
            ReachabilityStatus::Offline(OfflineReason::DnsError),
            "Offline ❌ (DNS error)",
        ),
        (
            ReachabilityStatus::Offline(OfflineReason::Timeout),
            "Offline ❌ (Timeout)",
        ),
        (ReachabilityStatus::Offline(OfflineReason::Generic), "Offline ❌"),
    ];

    for (status, expected) in cases {
        assert_eq!(renderer.render_status(&status), expected);
    }
}

#[test]
fn test_render_row_shows_name_key_and_status() {
    let renderer = StatusRenderer::with_name_width(10);
    let endpoint = Endpoint::new("GitHub", "github.com");

    let row = renderer.render_row(&endpoint, &ReachabilityStatus::Online);

    assert!(row.starts_with("GitHub     https://github.com"));
    assert!(row.ends_with("Online ✅"));
}

#[test]
fn test_default_renderer_matches_new() {
    let endpoint = Endpoint::new("X", "x.test");
    let status = ReachabilityStatus::Offline(OfflineReason::Timeout);

    assert_eq!(
        StatusRenderer::default().render_row(&endpoint, &status),
        StatusRenderer::new().render_row(&endpoint, &status)
    );
}
