//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - The outbound HTTP client
//! - The logger
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{effective_timeout, init_client};
pub use logger::init_logger_with;
