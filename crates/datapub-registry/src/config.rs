//! # Registry Endpoint Configuration
//!
//! Two fully independent endpoint configurations, one per
//! [`RegistryMode`]. Test and production carry separate base URLs,
//! credentials, and DOI prefixes so a test credential can never reach
//! the production registry. Values come from the environment; passwords
//! are wrapped in [`Zeroizing`] and never appear in `Debug` output.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

/// Which DataCite registry an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryMode {
    /// The DataCite test registry; minted DOIs are not persistent.
    Test,
    /// The live registry; minted DOIs are persistent and public.
    Production,
}

impl fmt::Display for RegistryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryMode::Test => write!(f, "test"),
            RegistryMode::Production => write!(f, "production"),
        }
    }
}

/// Configuration failures surfaced at startup, not at request time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {detail}")]
    InvalidVar { var: &'static str, detail: String },
}

/// Endpoint, credentials, and prefix for one registry mode.
#[derive(Clone)]
pub struct RegistryConfig {
    pub base_url: Url,
    pub username: String,
    pub password: Zeroizing<String>,
    /// The DOI prefix this account mints under, e.g. `10.5072`.
    pub doi_prefix: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("doi_prefix", &self.doi_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// The full registry configuration: both modes plus the default.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub test: RegistryConfig,
    pub production: RegistryConfig,
    /// Mode used when a call does not request one explicitly.
    pub default_mode: RegistryMode,
}

const TEST_URL_VAR: &str = "DATAPUB_DATACITE_TEST_URL";
const PROD_URL_VAR: &str = "DATAPUB_DATACITE_URL";
const DEFAULT_TEST_URL: &str = "https://api.test.datacite.org";
const DEFAULT_PROD_URL: &str = "https://api.datacite.org";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl RegistrySettings {
    /// Load both endpoint configurations from the environment.
    ///
    /// Required: `DATAPUB_DATACITE_TEST_USER`, `DATAPUB_DATACITE_TEST_PASSWORD`,
    /// `DATAPUB_DATACITE_TEST_PREFIX` and the corresponding production
    /// variables (without `TEST_`). Base URLs, the default mode, and the
    /// timeout have defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match env::var("DATAPUB_DATACITE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "DATAPUB_DATACITE_TIMEOUT_SECS",
                detail: format!("not an integer: {raw}"),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let default_mode = match env::var("DATAPUB_DATACITE_DEFAULT_MODE").as_deref() {
            Ok("production") => RegistryMode::Production,
            Ok("test") | Err(_) => RegistryMode::Test,
            Ok(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "DATAPUB_DATACITE_DEFAULT_MODE",
                    detail: format!("expected \"test\" or \"production\", got {other:?}"),
                })
            }
        };

        Ok(Self {
            test: mode_config(
                TEST_URL_VAR,
                DEFAULT_TEST_URL,
                "DATAPUB_DATACITE_TEST_USER",
                "DATAPUB_DATACITE_TEST_PASSWORD",
                "DATAPUB_DATACITE_TEST_PREFIX",
                timeout_secs,
            )?,
            production: mode_config(
                PROD_URL_VAR,
                DEFAULT_PROD_URL,
                "DATAPUB_DATACITE_USER",
                "DATAPUB_DATACITE_PASSWORD",
                "DATAPUB_DATACITE_PREFIX",
                timeout_secs,
            )?,
            default_mode,
        })
    }

    /// The endpoint configuration for `mode`.
    pub fn config_for(&self, mode: RegistryMode) -> &RegistryConfig {
        match mode {
            RegistryMode::Test => &self.test,
            RegistryMode::Production => &self.production,
        }
    }
}

fn mode_config(
    url_var: &'static str,
    url_default: &str,
    user_var: &'static str,
    password_var: &'static str,
    prefix_var: &'static str,
    timeout_secs: u64,
) -> Result<RegistryConfig, ConfigError> {
    let raw_url = env::var(url_var).unwrap_or_else(|_| url_default.to_string());
    let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidVar {
        var: url_var,
        detail: e.to_string(),
    })?;

    Ok(RegistryConfig {
        base_url,
        username: env::var(user_var).map_err(|_| ConfigError::MissingVar(user_var))?,
        password: Zeroizing::new(
            env::var(password_var).map_err(|_| ConfigError::MissingVar(password_var))?,
        ),
        doi_prefix: env::var(prefix_var).map_err(|_| ConfigError::MissingVar(prefix_var))?,
        timeout_secs,
    })
}
