//! Client configuration validation.
//!
//! Runs once at startup. Every rule is checked independently and all
//! violations are collected, so an operator sees every problem in one pass.

use url::Url;

use super::constants::{INVALID_HEADER_CHARS, MAX_USER_AGENT_LENGTH, MIN_RESPONSE_SIZE_BYTES};
use super::types::ClientConfig;

/// Validates a client configuration.
///
/// # Returns
///
/// The list of violated rules, in a fixed order. An empty list means the
/// configuration is accepted.
///
/// # Examples
///
/// ```
/// use mini_proxy::config::{validate_client_config, ClientConfig};
///
/// let config = ClientConfig {
///     proxy_user: Some("alice".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(
///     validate_client_config(&config),
///     vec!["ProxyPassword must be provided along with ProxyUser.".to_string()]
/// );
/// ```
pub fn validate_client_config(config: &ClientConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if matches!(config.timeout_seconds, Some(t) if t <= 0) {
        errors.push("TimeoutSeconds must be greater than zero.".to_string());
    }

    if let Some(user_agent) = config.user_agent() {
        if let Err(violation) = check_user_agent(user_agent) {
            errors.push(violation.to_string());
        }
    }

    if let Some(proxy_url) = config.proxy_url() {
        if Url::parse(proxy_url).is_err() {
            errors.push("ProxyUrl must be a valid absolute URI.".to_string());
        }
    }

    if config.proxy_user().is_some() && config.proxy_password().is_none() {
        errors.push("ProxyPassword must be provided along with ProxyUser.".to_string());
    }

    match config.max_response_size_bytes {
        None => {}
        Some(max) if max > MIN_RESPONSE_SIZE_BYTES => {}
        Some(max) if max <= 0 => {
            errors.push("MaxResponseSizeBytes must be greater than zero if specified.".to_string())
        }
        Some(_) => errors.push("MaxResponseSizeBytes must be at least 1 MB.".to_string()),
    }

    errors
}

/// Checks a User-Agent value against the length and header-injection rules.
///
/// Shared with client construction, which re-checks the value before
/// installing it as a default header.
pub(crate) fn check_user_agent(user_agent: &str) -> Result<(), &'static str> {
    if user_agent.chars().count() > MAX_USER_AGENT_LENGTH {
        Err("UserAgent exceeds maximum length.")
    } else if user_agent.contains(INVALID_HEADER_CHARS) {
        Err("UserAgent contains invalid characters.")
    } else {
        Ok(())
    }
}
