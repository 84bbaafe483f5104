//! mini_proxy library: a guarded fetch-and-extract relay
//!
//! Given a target URL, the library fetches it server-side through a
//! [`FetchClient`] that enforces a timeout, a redirect limit, an optional
//! upstream proxy and a response size cap. The body can then be run through
//! an [`Extractor`], which applies a caller-supplied regular expression under
//! a time budget and a match-count cap and returns the named captures of each
//! match.
//!
//! # Example
//!
//! ```no_run
//! use mini_proxy::{ClientConfig, Extractor, FetchClient, ValidatedClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ValidatedClientConfig::new(ClientConfig {
//!     timeout_seconds: Some(10),
//!     ..Default::default()
//! })?;
//! let client = FetchClient::new(&config)?;
//!
//! let body = client.fetch_text("https://example.com/").await?;
//! let matches = Extractor::default()
//!     .extract(r"<title>(?<title>[^<]*)</title>", body)
//!     .await?;
//! println!("{:?}", matches.first().and_then(|m| m.get("title")));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod server;

// Re-export public API
pub use config::{ClientConfig, LogFormat, LogLevel, Opt, ValidatedClientConfig};
pub use error_handling::{ClientError, ConfigValidationError, ErrorSource};
pub use extract::{ExtractionError, ExtractionLimits, Extractor, NamedCaptures};
pub use fetch::FetchClient;
pub use server::{router, start_server, AppState, FetchResponse};
