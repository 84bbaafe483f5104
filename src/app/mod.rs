//! Main application modules.
//!
//! This module provides target URL validation and shutdown handling used by
//! the fetch pipeline and the binary.

pub mod shutdown;
pub mod url;

// Re-export public API
pub use shutdown::shutdown_signal;
pub use url::validate_target_url;
