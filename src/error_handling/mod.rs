//! Error handling.
//!
//! This module provides:
//! - The classified [`ClientError`] shared by the fetch and extraction stages
//! - Startup error types (configuration validation, initialization)
//! - Categorization of transport errors into client errors

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, FetchPhase};
pub use types::{BoxError, ClientError, ConfigValidationError, ErrorSource, InitializationError};
