//! Regex-based extraction of named captures from fetched text.
//!
//! The [`Extractor`] enforces three bounds on caller-supplied patterns:
//! a pattern length cap checked before compiling, a time budget covering
//! compilation and matching, and a cap on the number of matches.
//!
//! Matching runs on tokio's blocking pool. When the budget runs out the
//! caller stops waiting and raises a cancellation flag that the worker checks
//! between matches, so an abandoned worker may still run until it finishes
//! the match in progress.

mod captures;
mod matching;

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::config::{MAX_PATTERN_LENGTH, MAX_REGEX_MATCHES, REGEX_TIME_BUDGET};
use crate::error_handling::{ClientError, ErrorSource};
use matching::{extract_bounded, Budget};

pub use captures::NamedCaptures;

/// Why an extraction failed.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The pattern is longer than the configured limit.
    #[error("The 'parseRegex' must not exceed {max} characters.")]
    PatternTooLong { max: usize },

    /// The pattern does not compile (bad syntax or too large a program).
    #[error("The provided 'parseRegex' is not a valid regular expression.")]
    InvalidPattern(#[source] regex::Error),

    /// Compiling or matching did not finish within the time budget.
    #[error("The provided 'parseRegex' took too long to compile.")]
    TimedOut,

    /// The pattern matched more often than allowed.
    #[error("Regex matched too many results (max: {max}). Consider refining your pattern.")]
    TooManyMatches { max: usize },

    /// The matching worker panicked or was cancelled by the runtime.
    #[error("Failed to evaluate 'parseRegex': {0}")]
    WorkerFailed(#[source] tokio::task::JoinError),
}

impl From<ExtractionError> for ClientError {
    fn from(error: ExtractionError) -> Self {
        let kind = match error {
            ExtractionError::WorkerFailed(_) => ErrorSource::Unknown,
            _ => ErrorSource::Request,
        };
        ClientError::with_cause(kind, error.to_string(), error)
    }
}

/// Bounds applied to every extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    /// Maximum pattern length in characters.
    pub max_pattern_length: usize,
    /// Maximum number of matches.
    pub max_matches: usize,
    /// Budget for compiling and matching together.
    pub time_budget: Duration,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_pattern_length: MAX_PATTERN_LENGTH,
            max_matches: MAX_REGEX_MATCHES,
            time_budget: REGEX_TIME_BUDGET,
        }
    }
}

/// Applies caller-supplied patterns to fetched text.
///
/// # Examples
///
/// ```
/// use mini_proxy::extract::Extractor;
///
/// # #[tokio::main]
/// # async fn main() {
/// let matches = Extractor::default()
///     .extract(r"(?<letter>[a-z])(?<digit>\d)", "a1 b2 c3".to_string())
///     .await
///     .unwrap();
/// assert_eq!(matches.len(), 3);
/// assert_eq!(matches[1].get("letter"), Some("b"));
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    limits: ExtractionLimits,
}

impl Extractor {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    /// Runs `pattern` against `text` and returns one mapping per match.
    ///
    /// Callers skip this stage entirely for an empty pattern.
    ///
    /// # Errors
    ///
    /// See [`ExtractionError`]; every variant except `WorkerFailed` is the
    /// caller's to fix.
    pub async fn extract(
        &self,
        pattern: &str,
        text: String,
    ) -> Result<Vec<NamedCaptures>, ExtractionError> {
        self.check_pattern_length(pattern)?;

        let limits = self.limits;
        let budget = Budget::new(Instant::now() + limits.time_budget);
        let worker_budget = budget.clone();
        let pattern = pattern.to_string();

        let worker = tokio::task::spawn_blocking(move || {
            extract_bounded(&pattern, &text, limits.max_matches, &worker_budget)
        });

        match tokio::time::timeout(limits.time_budget, worker).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ExtractionError::WorkerFailed(join_error)),
            Err(_) => {
                debug!(
                    "Extraction exceeded {:?} budget, cancelling worker",
                    limits.time_budget
                );
                budget.cancel();
                Err(ExtractionError::TimedOut)
            }
        }
    }

    fn check_pattern_length(&self, pattern: &str) -> Result<(), ExtractionError> {
        if pattern.chars().count() > self.limits.max_pattern_length {
            return Err(ExtractionError::PatternTooLong {
                max: self.limits.max_pattern_length,
            });
        }
        Ok(())
    }
}
