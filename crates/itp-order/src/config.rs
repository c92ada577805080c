//! Order-status authority configuration.
//!
//! Defaults point at the Beckn staging gateway. Override via environment
//! variables or explicit construction for other deployments and tests.

use url::Url;

/// Default order-status endpoint.
pub const DEFAULT_ORDER_STATUS_URL: &str = "https://bap-gcl-staging.becknprotocol.io/status";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the order-status call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderVerificationConfig {
    /// Endpoint receiving the `POST` of the order details.
    pub status_url: Url,
    /// Per-request timeout in seconds. A timeout is a rejection.
    pub timeout_secs: u64,
    /// Transport-failure retries. `0` means a single attempt.
    pub max_retries: u32,
}

impl OrderVerificationConfig {
    /// Single attempt against `status_url` with the default timeout.
    pub fn new(status_url: Url) -> Self {
        Self {
            status_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: 0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ORDER_STATUS_URL` (default: [`DEFAULT_ORDER_STATUS_URL`])
    /// - `ORDER_STATUS_TIMEOUT_SECS` (default: 10, must be positive)
    /// - `ORDER_STATUS_MAX_RETRIES` (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url =
            lookup("ORDER_STATUS_URL").unwrap_or_else(|| DEFAULT_ORDER_STATUS_URL.to_string());
        let status_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidUrl("ORDER_STATUS_URL".to_string(), e.to_string())
        })?;

        let timeout_secs =
            parse_number(&lookup, "ORDER_STATUS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber(
                "ORDER_STATUS_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let max_retries = parse_number(&lookup, "ORDER_STATUS_MAX_RETRIES", 0u32)?;

        Ok(Self {
            status_url,
            timeout_secs,
            max_retries,
        })
    }
}

fn parse_number<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidNumber(var.to_string(), e.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidNumber(String, String),
}
