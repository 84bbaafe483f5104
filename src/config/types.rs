//! Configuration types and CLI options.
//!
//! This module defines the outbound client configuration, the validated
//! wrapper around it, and the command-line options for the binary.

use std::net::IpAddr;
use std::ops::Deref;

use clap::{Args, Parser, ValueEnum};

use crate::config::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_HTTP_PORT};
use crate::config::validation::validate_client_config;
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Outbound HTTP client configuration.
///
/// Every field is optional. Integer fields are signed so that out-of-range
/// values coming from flags or the environment reach the validator instead of
/// failing inside the argument parser.
///
/// # Examples
///
/// ```
/// use mini_proxy::config::ClientConfig;
///
/// let config = ClientConfig {
///     timeout_seconds: Some(15),
///     max_response_size_bytes: Some(5 * 1024 * 1024),
///     ..Default::default()
/// };
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds (connect + read)
    #[arg(long, env = "CLIENT_TIMEOUT_SECONDS", allow_negative_numbers = true)]
    pub timeout_seconds: Option<i64>,

    /// User-Agent header sent with every outbound request
    #[arg(long, env = "CLIENT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Upstream proxy URL all outbound traffic is routed through
    #[arg(long, env = "CLIENT_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Upstream proxy user name
    #[arg(long, env = "CLIENT_PROXY_USER")]
    pub proxy_user: Option<String>,

    /// Upstream proxy password (required with --proxy-user)
    #[arg(long, env = "CLIENT_PROXY_PASSWORD", hide_env_values = true)]
    pub proxy_password: Option<String>,

    /// Maximum accepted response body size in bytes (must exceed 1 MiB; unset disables the cap)
    #[arg(
        long,
        env = "CLIENT_MAX_RESPONSE_SIZE_BYTES",
        allow_negative_numbers = true
    )]
    pub max_response_size_bytes: Option<i64>,
}

impl ClientConfig {
    /// Returns every rule this configuration violates (empty when valid).
    pub fn validate(&self) -> Vec<String> {
        validate_client_config(self)
    }

    /// User-Agent, treating a blank value as unset.
    pub fn user_agent(&self) -> Option<&str> {
        non_blank(self.user_agent.as_deref())
    }

    /// Proxy URL, treating a blank value as unset.
    pub fn proxy_url(&self) -> Option<&str> {
        non_blank(self.proxy_url.as_deref())
    }

    /// Proxy user, treating a blank value as unset.
    pub fn proxy_user(&self) -> Option<&str> {
        non_blank(self.proxy_user.as_deref())
    }

    /// Proxy password, treating a blank value as unset.
    pub fn proxy_password(&self) -> Option<&str> {
        non_blank(self.proxy_password.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A `ClientConfig` that passed validation.
///
/// The only way to obtain one is [`ValidatedClientConfig::new`], which runs
/// every validation rule and reports all violations at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedClientConfig(ClientConfig);

impl ValidatedClientConfig {
    /// Validates `config`, returning the full list of violations on failure.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigValidationError> {
        let violations = config.validate();
        if violations.is_empty() {
            Ok(Self(config))
        } else {
            Err(ConfigValidationError { violations })
        }
    }

    /// Consumes the wrapper, returning the inner configuration.
    pub fn into_inner(self) -> ClientConfig {
        self.0
    }
}

impl Deref for ValidatedClientConfig {
    type Target = ClientConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Command-line options and configuration.
///
/// Every option can also be supplied through the environment variable named
/// in its help text; a `.env` file in the working directory is loaded first.
///
/// # Examples
///
/// ```bash
/// # Listen on the default port with default client settings
/// mini_proxy
///
/// # Route through a proxy and cap bodies at 5 MiB
/// mini_proxy --proxy-url http://proxy:3128 --max-response-size-bytes 5242880
///
/// # Same, from the environment
/// HTTP_PORT=9000 CLIENT_TIMEOUT_SECONDS=10 mini_proxy
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mini_proxy",
    version,
    about = "Fetches a URL server-side and optionally extracts named regex captures."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Address the HTTP listener binds to
    #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: IpAddr,

    /// HTTP listening port
    #[arg(long, env = "HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// Outbound client settings
    #[command(flatten)]
    pub client: ClientConfig,
}
