//! URL validation for configured endpoints
//!
//! Both the engine endpoint and the callback URL advertised to Twilio must be
//! absolute `http`/`https` URLs with a host. Reachability is not checked here;
//! the engine may legitimately live on a private network.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Validates that `url` is an absolute HTTP(S) URL with a host
///
/// # Example
/// ```rust,ignore
/// use callbridge::utils::url_validation::validate_http_url;
///
/// assert!(validate_http_url("https://bridge.example.com/").is_ok());
/// assert!(validate_http_url("bridge.example.com").is_err());
/// ```
pub fn validate_http_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "https" && scheme != "http" {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    if scheme == "http" {
        warn!(url = %url, "URL does not use HTTPS");
    }

    Ok(parsed)
}
