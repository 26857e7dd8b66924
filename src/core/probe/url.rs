//! Locator normalization
//!
//! Turns a bare host or partial URL into a fully qualified URL. Only the
//! normalizer is used on the probe path; the validation helpers serve the
//! configuration layer.

use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL format: {0}")]
    ParseError(#[from] url::ParseError),
    #[error("Missing host in URL")]
    MissingHost,
}

/// Normalize a locator into a probe URL
///
/// Locators starting with `http` (covering `http://` and `https://`) are
/// returned unchanged; anything else gets an `https://` prefix. Total over
/// all inputs and idempotent: the empty string becomes `https://`.
///
/// # Examples
/// - `github.com` → `https://github.com`
/// - `http://localhost:8080` → `http://localhost:8080`
pub fn normalize_locator(locator: &str) -> String {
    if locator.starts_with("http") {
        locator.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, locator)
    }
}

/// Check that a locator normalizes to a URL with a host
pub fn validate_locator(locator: &str) -> Result<Url, UrlError> {
    let url = Url::parse(&normalize_locator(locator))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }
    Ok(url)
}

/// Extract the host component of a locator
///
/// # Returns
/// * `Ok(String)` - Host component (e.g., "github.com")
/// * `Err(UrlError)` - Locator does not normalize to a valid URL with a host
pub fn extract_host(locator: &str) -> Result<String, UrlError> {
    validate_locator(locator)?
        .host_str()
        .map(|h| h.to_string())
        .ok_or(UrlError::MissingHost)
}
