//! Error type definitions.
//!
//! This module defines the classified client error returned by the fetch and
//! extraction stages, plus the startup error types.

use std::fmt;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Boxed cause carried by a [`ClientError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Where a client failure originated.
///
/// The kind alone decides how a failure is presented to the caller: request
/// errors are the caller's to fix, everything else is a server fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorSource {
    /// Unclassified failure, typically while reading or decoding a response.
    Unknown,
    /// The client itself is misconfigured.
    Configuration,
    /// Bad input, upstream failure, or a violated size/time/count bound.
    Request,
}

impl ErrorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSource::Unknown => "Unknown",
            ErrorSource::Configuration => "Configuration",
            ErrorSource::Request => "Request",
        }
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure from the fetch or extraction stage.
///
/// Carries the [`ErrorSource`], the message shown to the caller, and the
/// underlying error when there is one.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorSource,
    message: String,
    #[source]
    cause: Option<BoxError>,
}

impl ClientError {
    /// Creates an error of the given kind without an underlying cause.
    pub fn new(kind: ErrorSource, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error of the given kind wrapping `cause`.
    pub fn with_cause(
        kind: ErrorSource,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// Shorthand for a [`ErrorSource::Request`] error.
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ErrorSource::Request, message)
    }

    /// Shorthand for a [`ErrorSource::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorSource::Configuration, message)
    }

    pub fn kind(&self) -> ErrorSource {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Startup rejection of a client configuration.
///
/// Holds every violated rule, not just the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid client configuration: {}", violations.join(" "))]
pub struct ConfigValidationError {
    /// Violated rules, in validation order.
    pub violations: Vec<String>,
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error binding the HTTP listener.
    #[error("Failed to bind HTTP listener to {address}: {source}")]
    ListenerBindError {
        address: std::net::SocketAddr,
        source: std::io::Error,
    },
}
