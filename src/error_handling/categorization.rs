//! Error categorization.
//!
//! Maps transport failures from `reqwest` onto the classified [`ClientError`]
//! used by the rest of the crate.

use std::time::Duration;

use super::types::{ClientError, ErrorSource};

/// Phase of an outbound request in which a transport error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Sending the request and waiting for response headers.
    Send,
    /// Streaming the response body.
    Body,
}

/// Categorizes a `reqwest::Error` into a [`ClientError`].
///
/// This is the single place that decides which transport failures the caller
/// can act on:
/// - Timeouts (any phase) are `Request` errors echoing the configured limit
/// - Connect, redirect-limit and other send failures are `Request` errors
/// - Failures while reading the body are `Unknown`
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `phase` - Whether the error happened before or after response headers
/// * `timeout` - The effective whole-request timeout, for the message
pub fn categorize_reqwest_error(
    error: reqwest::Error,
    phase: FetchPhase,
    timeout: Duration,
) -> ClientError {
    if error.is_timeout() {
        let message = format!("Request timeout exceeded {} seconds.", timeout.as_secs());
        return ClientError::with_cause(ErrorSource::Request, message, error);
    }

    match phase {
        FetchPhase::Send => {
            let message = format!("Failed to fetch the URL: {}", describe_send_error(&error));
            ClientError::with_cause(ErrorSource::Request, message, error)
        }
        FetchPhase::Body => {
            let message = format!("Failed to read response content: {}", error);
            ClientError::with_cause(ErrorSource::Unknown, message, error)
        }
    }
}

/// Short human-readable description of a send-phase failure.
fn describe_send_error(error: &reqwest::Error) -> String {
    if error.is_redirect() {
        format!("too many redirects ({})", error)
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else if error.is_builder() {
        format!("invalid request ({})", error)
    } else {
        error.to_string()
    }
}
