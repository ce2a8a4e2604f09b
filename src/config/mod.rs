//! Configuration handling for the analysis pipeline.
//!
//! All tunables are read from environment variables with development
//! defaults, so the library works out of the box while deployments can
//! tighten or loosen the fetch and link-check bounds without a rebuild.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Keeping them public lets tests and the
/// consuming service refer to them directly.
pub const ENV_FETCH_TIMEOUT_MS: &str = "FETCH_TIMEOUT_MS";
pub const ENV_HTML_SIZE_LIMIT: &str = "HTML_SIZE_LIMIT";
pub const ENV_LINK_CHECK_LIMIT: &str = "LINK_CHECK_LIMIT";
pub const ENV_LINK_TIMEOUT_MS: &str = "LINK_TIMEOUT_MS";

/// Default values used when environment variables are absent.
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_HTML_SIZE_LIMIT: usize = 1024 * 1024;
const DEFAULT_LINK_CHECK_LIMIT: usize = 25;
const DEFAULT_LINK_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration for one analyzer instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    fetch_timeout: Duration,
    html_size_limit: usize,
    link_check_limit: usize,
    link_timeout: Duration,
}

impl Config {
    /// Create a config explicitly.
    pub fn new(
        fetch_timeout: Duration,
        html_size_limit: usize,
        link_check_limit: usize,
        link_timeout: Duration,
    ) -> Self {
        Self {
            fetch_timeout,
            html_size_limit,
            link_check_limit,
            link_timeout,
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// Fails only when a variable is present but not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fetch_timeout =
            Duration::from_millis(read_number(ENV_FETCH_TIMEOUT_MS, DEFAULT_FETCH_TIMEOUT_MS)?);
        let html_size_limit = read_number(ENV_HTML_SIZE_LIMIT, DEFAULT_HTML_SIZE_LIMIT)?;
        let link_check_limit = read_number(ENV_LINK_CHECK_LIMIT, DEFAULT_LINK_CHECK_LIMIT)?;
        let link_timeout =
            Duration::from_millis(read_number(ENV_LINK_TIMEOUT_MS, DEFAULT_LINK_TIMEOUT_MS)?);
        Ok(Self {
            fetch_timeout,
            html_size_limit,
            link_check_limit,
            link_timeout,
        })
    }

    /// Upper bound on waiting for the page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    /// Ceiling on decoded HTML size; longer bodies are truncated.
    pub fn html_size_limit(&self) -> usize {
        self.html_size_limit
    }
    /// Maximum number of extracted links probed for reachability.
    pub fn link_check_limit(&self) -> usize {
        self.link_check_limit
    }
    /// Independent timeout applied to each link probe.
    pub fn link_timeout(&self) -> Duration {
        self.link_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            DEFAULT_HTML_SIZE_LIMIT,
            DEFAULT_LINK_CHECK_LIMIT,
            Duration::from_millis(DEFAULT_LINK_TIMEOUT_MS),
        )
    }
}

fn read_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
