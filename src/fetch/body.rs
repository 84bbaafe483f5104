//! Response body size enforcement.
//!
//! The cap is applied three times: against the advertised `Content-Length`
//! before reading, against the running byte count while streaming, and
//! against the decoded text. `Content-Length` is server-controlled and may be
//! missing (chunked encoding), so only the streaming check bounds memory.

use std::time::Duration;

use log::debug;

use crate::config::BYTES_PER_MEGABYTE;
use crate::error_handling::{categorize_reqwest_error, ClientError, FetchPhase};

/// Maximum accepted response body size.
///
/// `None` means unlimited. Non-positive configured values also disable the
/// cap; validation rejects them before a client is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseSizeLimit(Option<u64>);

impl ResponseSizeLimit {
    /// No cap.
    pub const UNLIMITED: Self = Self(None);

    /// Builds the limit from the configured `max_response_size_bytes`.
    pub fn from_config(max_response_size_bytes: Option<i64>) -> Self {
        Self(
            max_response_size_bytes
                .filter(|max| *max > 0)
                .map(i64::unsigned_abs),
        )
    }

    pub fn max_bytes(&self) -> Option<u64> {
        self.0
    }

    /// Fails if the advertised `Content-Length` is above the cap.
    pub fn check_advertised(&self, content_length: Option<u64>) -> Result<(), ClientError> {
        match (self.0, content_length) {
            (Some(max), Some(len)) if len > max => {
                debug!("Content-Length {} exceeds cap of {} bytes", len, max);
                Err(size_exceeded(max))
            }
            _ => Ok(()),
        }
    }

    /// Fails if `len` bytes is above the cap.
    pub fn check_len(&self, len: usize) -> Result<(), ClientError> {
        match self.0 {
            Some(max) if len as u64 > max => Err(size_exceeded(max)),
            _ => Ok(()),
        }
    }
}

fn size_exceeded(max: u64) -> ClientError {
    // Integer division: a cap of 1.5 MiB is reported as 1 MB
    ClientError::request(format!(
        "Response size exceeds maximum allowed size of {} MB.",
        max / BYTES_PER_MEGABYTE
    ))
}

/// Reads the response body as text, enforcing `limit`.
///
/// The body is streamed and reading stops as soon as the running total passes
/// the cap. The bytes are decoded as UTF-8, replacing invalid sequences with
/// U+FFFD, and the decoded length in characters is checked again.
///
/// # Errors
///
/// - `Request` if any size check fails or the read times out
/// - `Unknown` for any other failure while reading the body
pub(crate) async fn read_text_capped(
    mut response: reqwest::Response,
    limit: ResponseSizeLimit,
    timeout: Duration,
) -> Result<String, ClientError> {
    limit.check_advertised(response.content_length())?;

    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| categorize_reqwest_error(e, FetchPhase::Body, timeout))?
    {
        limit.check_len(body.len() + chunk.len())?;
        body.extend_from_slice(&chunk);
    }

    let text = match String::from_utf8(body) {
        Ok(text) => text,
        Err(e) => {
            debug!("Response body is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    // Characters, not bytes: each U+FFFD replacement is 3 bytes for 1 raw byte
    limit.check_len(text.chars().count())?;
    Ok(text)
}
