//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Client configuration types and CLI option parsing
//! - Startup validation of the client configuration

mod constants;
mod types;
mod validation;

// Re-export all constants
pub use constants::*;
pub use types::{ClientConfig, LogFormat, LogLevel, Opt, ValidatedClientConfig};
pub use validation::validate_client_config;

pub(crate) use validation::check_user_agent;
