//! Guarded outbound fetching.
//!
//! This module provides the [`FetchClient`], which performs a single GET per
//! call and returns the body as text, and the response size enforcement it
//! relies on.

mod body;
mod client;

pub use body::ResponseSizeLimit;
pub use client::FetchClient;
