//! Configuration constants.
//!
//! This module defines the fixed limits used by the fetch client and the
//! extraction stage, plus listener defaults.

use std::time::Duration;

/// One mebibyte, the unit used for response size limits and messages.
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Smallest accepted response size cap, exclusive.
///
/// A configured `max_response_size_bytes` must be strictly greater than this.
pub const MIN_RESPONSE_SIZE_BYTES: i64 = 1024 * 1024;

/// Maximum User-Agent length in characters.
pub const MAX_USER_AGENT_LENGTH: usize = 400;

/// Characters rejected in a User-Agent value (header injection guard).
pub const INVALID_HEADER_CHARS: &[char] = &['\r', '\n', '\t', '\0'];

/// Default User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("mini_proxy/", env!("CARGO_PKG_VERSION"));

// Network operation timeouts
/// Whole-request timeout used when `timeout_seconds` is not configured
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 100;
/// TCP connection timeout in seconds (capped by the whole-request timeout)
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 16;

/// Destinations that never go through the upstream proxy.
pub const PROXY_BYPASS_HOSTS: &str = "localhost,127.0.0.0/8,::1";

// Extraction limits
/// Maximum `parseRegex` length in characters
pub const MAX_PATTERN_LENGTH: usize = 5000;
/// Maximum number of matches a single extraction may produce
pub const MAX_REGEX_MATCHES: usize = 10_000;
/// Time budget for compiling and running a pattern
pub const REGEX_TIME_BUDGET: Duration = Duration::from_secs(1);
/// Upper bound on the compiled program size of a caller-supplied pattern (10MB)
pub const REGEX_SIZE_LIMIT: usize = 10 * 1024 * 1024;

// Listener
/// Default HTTP listening port
pub const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default bind address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
