//! The outbound fetch client.

use std::time::Duration;

use log::debug;

use super::body::{read_text_capped, ResponseSizeLimit};
use crate::app::validate_target_url;
use crate::config::ClientConfig;
use crate::error_handling::{categorize_reqwest_error, ClientError, FetchPhase};
use crate::initialization::{effective_timeout, init_client};

/// Performs single guarded GET requests.
///
/// Built once from a [`ClientConfig`] and shared across requests; cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    timeout: Duration,
    size_limit: ResponseSizeLimit,
}

impl FetchClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the transport cannot be set up from
    /// the given settings (bad proxy URL, malformed User-Agent, ...).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: init_client(config)?,
            timeout: effective_timeout(config)?,
            size_limit: ResponseSizeLimit::from_config(config.max_response_size_bytes),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn size_limit(&self) -> ResponseSizeLimit {
        self.size_limit
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - `Request`: empty, relative or non-HTTP(S) URL (no network call is
    ///   made), transport failure or timeout, non-2xx status, oversized body
    /// - `Unknown`: any other failure while reading the body
    pub async fn fetch_text(&self, url: &str) -> Result<String, ClientError> {
        let url = validate_target_url(url)?;
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(e, FetchPhase::Send, self.timeout))?;

        let status = response.status();
        log::trace!(
            "Response from {}: {} ({:?})",
            response.url(),
            status,
            response.version()
        );

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status Code");
            return Err(ClientError::request(format!(
                "Failed to fetch the URL. HTTP Status: {} {}",
                status.as_u16(),
                reason
            )));
        }

        let text = read_text_capped(response, self.size_limit, self.timeout).await?;
        debug!("Fetched {} bytes", text.len());
        Ok(text)
    }
}
