//! HTTP client initialization.
//!
//! This module builds the outbound `reqwest::Client` from a [`ClientConfig`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{ClientBuilder, NoProxy, Proxy};

use crate::config::{
    check_user_agent, ClientConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    MAX_REDIRECT_HOPS, PROXY_BYPASS_HOSTS, TCP_CONNECT_TIMEOUT_SECS,
};
use crate::error_handling::{ClientError, ErrorSource};

/// Returns the whole-request timeout for a configuration.
///
/// Falls back to [`DEFAULT_REQUEST_TIMEOUT_SECS`] when unset.
///
/// # Errors
///
/// Returns a `Configuration` error for a non-positive value that slipped past
/// validation.
pub fn effective_timeout(config: &ClientConfig) -> Result<Duration, ClientError> {
    match config.timeout_seconds {
        None => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs.unsigned_abs())),
        Some(secs) => Err(ClientError::configuration(format!(
            "Invalid 'timeoutSeconds': {} (must be greater than zero).",
            secs
        ))),
    }
}

/// Initializes the HTTP client used for fetching target URLs.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS`)
/// - Whole-request timeout plus a shorter connect timeout
/// - HTTP/2 negotiated via ALPN, falling back to HTTP/1.1
/// - Optional upstream proxy with basic credentials, bypassed for loopback
/// - User-Agent default header
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns a `Configuration` error if the proxy URL, timeout or User-Agent is
/// unusable, or if the client cannot be built.
pub fn init_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let timeout = effective_timeout(config)?;
    let connect_timeout = timeout.min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));

    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .default_headers(default_headers(config)?);

    if let Some(proxy) = build_proxy(config)? {
        builder = builder.proxy(proxy);
    } else {
        // Ignore HTTP(S)_PROXY from the environment; proxying is configured explicitly
        builder = builder.no_proxy();
    }

    builder.build().map_err(|e| {
        ClientError::with_cause(
            ErrorSource::Configuration,
            format!("Failed to build HTTP client: {}", e),
            e,
        )
    })
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, ClientError> {
    let user_agent = config.user_agent().unwrap_or(DEFAULT_USER_AGENT);

    check_user_agent(user_agent).map_err(|violation| {
        ClientError::configuration(format!("Error parsing 'userAgent': {}", violation))
    })?;
    let value = HeaderValue::from_str(user_agent).map_err(|e| {
        ClientError::with_cause(
            ErrorSource::Configuration,
            format!("Error parsing 'userAgent': {}.", e),
            e,
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, value);
    Ok(headers)
}

fn build_proxy(config: &ClientConfig) -> Result<Option<Proxy>, ClientError> {
    let Some(proxy_url) = config.proxy_url() else {
        return Ok(None);
    };

    let mut proxy = Proxy::all(proxy_url).map_err(|e| {
        ClientError::with_cause(
            ErrorSource::Configuration,
            format!("Error parsing 'proxyUrl': {}", e),
            e,
        )
    })?;

    if let Some(user) = config.proxy_user() {
        proxy = proxy.basic_auth(user, config.proxy_password().unwrap_or_default());
    }

    Ok(Some(proxy.no_proxy(NoProxy::from_string(PROXY_BYPASS_HOSTS))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_timeout_default() {
        let timeout = effective_timeout(&ClientConfig::default()).unwrap();
        assert_eq!(timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_effective_timeout_configured() {
        let config = ClientConfig {
            timeout_seconds: Some(7),
            ..Default::default()
        };
        assert_eq!(effective_timeout(&config).unwrap(), Duration::from_secs(7));
    }

    #[test]
    fn test_effective_timeout_rejects_non_positive() {
        let config = ClientConfig {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        let err = effective_timeout(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorSource::Configuration);
    }

    #[test]
    fn test_init_client_with_defaults() {
        assert!(init_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_init_client_with_proxy_and_credentials() {
        let config = ClientConfig {
            proxy_url: Some("http://proxy.internal:3128".to_string()),
            proxy_user: Some("alice".to_string()),
            proxy_password: Some("s3cret".to_string()),
            ..Default::default()
        };
        assert!(init_client(&config).is_ok());
    }

    #[test]
    fn test_init_client_rejects_header_injection_in_user_agent() {
        let config = ClientConfig {
            user_agent: Some("agent\r\nX-Injected: 1".to_string()),
            ..Default::default()
        };
        let err = init_client(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorSource::Configuration);
        assert!(err.message().contains("userAgent"));
    }

    #[test]
    fn test_init_client_rejects_invalid_header_bytes() {
        // DEL is not a control character per the validator but is not a valid header byte
        let config = ClientConfig {
            user_agent: Some("agent\u{7f}".to_string()),
            ..Default::default()
        };
        let err = init_client(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorSource::Configuration);
    }
}
