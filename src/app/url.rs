//! Target URL validation.

use log::debug;
use url::Url;

use crate::error_handling::ClientError;

/// Validates the target URL of a fetch request.
///
/// Accepts only absolute `http://` and `https://` URLs. Unlike a browser
/// address bar, no scheme is guessed: `example.com` is rejected.
///
/// # Arguments
///
/// * `url` - The raw URL string from the request
///
/// # Returns
///
/// The parsed URL, or a `Request` error describing why it was rejected.
///
/// # Examples
///
/// ```
/// use mini_proxy::app::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/page").is_ok());
/// assert!(validate_target_url("ftp://example.com/file").is_err());
/// assert!(validate_target_url("example.com").is_err());
/// ```
pub fn validate_target_url(url: &str) -> Result<Url, ClientError> {
    if url.is_empty() {
        return Err(ClientError::request(
            "The 'url' query parameter is required.",
        ));
    }

    let parsed = Url::parse(url).map_err(|e| {
        debug!("Rejecting unparseable URL {:?}: {}", url, e);
        ClientError::request("The 'url' must be a valid absolute URI.")
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => {
            debug!("Rejecting unsupported scheme '{}' for URL: {}", scheme, url);
            Err(ClientError::request(
                "The 'url' must use HTTP or HTTPS scheme.",
            ))
        }
    }
}
