//! Service configuration, read once at startup.
//!
//! Variables:
//! - `PORT` (default: 8080)
//! - `PROVIDER_ID` (required): the provider's DSNP user id, decimal
//! - `PROVIDER_CREDENTIAL_SIGNING_KEY_URI` (required, secret)
//! - `PROVIDER_CREDENTIAL_SIGNING_KEY_ID` (required)
//! - `ORDER_STATUS_URL`, `ORDER_STATUS_TIMEOUT_SECS`, `ORDER_STATUS_MAX_RETRIES`:
//!   see [`OrderVerificationConfig`]

use itp_core::{CoreError, ProviderId};
use itp_crypto::{CryptoError, SigningKeyMaterial};
use itp_order::OrderVerificationConfig;

const DEFAULT_PORT: u16 = 8080;

/// Everything the service needs from its environment.
///
/// `Debug` is safe to log: the key URI is redacted by
/// [`SigningKeyMaterial`].
#[derive(Debug)]
pub struct AppConfig {
    pub port: u16,
    pub provider_id: ProviderId,
    pub signing_key: SigningKeyMaterial,
    pub order: OrderVerificationConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        };

        let provider_id = ProviderId::parse(&required(&lookup, "PROVIDER_ID")?)?;
        let signing_key = SigningKeyMaterial::new(
            required(&lookup, "PROVIDER_CREDENTIAL_SIGNING_KEY_URI")?,
            required(&lookup, "PROVIDER_CREDENTIAL_SIGNING_KEY_ID")?,
        )?;
        let order = OrderVerificationConfig::from_lookup(&lookup)?;

        Ok(Self {
            port,
            provider_id,
            signing_key,
            order,
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

/// Configuration errors. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("PROVIDER_ID: {0}")]
    Provider(#[from] CoreError),
    #[error("signing key: {0}")]
    SigningKey(#[from] CryptoError),
    #[error(transparent)]
    Order(#[from] itp_order::ConfigError),
}
