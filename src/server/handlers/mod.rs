//! HTTP handlers.

mod fetch;

pub use fetch::{error_message, fetch_handler, status_for};
