use crate::utils::url_validation::validate_http_url;

/// Validate the conversational engine endpoint
pub fn validate_engine_url(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    validate_http_url(url).map_err(|e| format!("Invalid engine URL '{url}': {e}"))?;
    Ok(())
}

/// Validate the callback URL advertised to Twilio, if one is configured
pub fn validate_webhook_url(url: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = url {
        validate_http_url(url).map_err(|e| format!("Invalid webhook URL '{url}': {e}"))?;
    }
    Ok(())
}
