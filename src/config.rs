//! Client configuration.
//!
//! [`ClientConfig`] carries everything the HTTP client needs: the API base
//! URL and the request timeout. Build it explicitly with
//! [`ClientConfigBuilder`] or read it from the environment with
//! [`ClientConfig::from_env`].
//!
//! | Variable                | Meaning                         | Default |
//! |-------------------------|---------------------------------|---------|
//! | `PVO_API_BASE_URL`      | Base URL every endpoint hangs on | required |
//! | `PVO_API_TIMEOUT_SECS`  | Per-request timeout in seconds  | `10`    |

use derive_builder::Builder;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "PVO_API_BASE_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PVO_API_TIMEOUT_SECS";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`ApiClient`](crate::net::ApiClient).
///
/// ```rust
/// use pvo::config::ClientConfigBuilder;
/// use std::time::Duration;
///
/// let config = ClientConfigBuilder::default()
///     .base_url("http://localhost:8000/api")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url, "http://localhost:8000/api");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:8000/api`
    pub base_url: String,

    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,

    #[builder(default = "concat!(\"pvo/\", env!(\"CARGO_PKG_VERSION\")).to_string()")]
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with default timeout for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("pvo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Reads the configuration from `PVO_API_BASE_URL` and
    /// `PVO_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If the base URL is unset or the timeout is not
    ///   a whole number of seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](ClientConfig::from_env) with a custom variable
    /// lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{} is not set", BASE_URL_ENV)))?;

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{} must be a number of seconds, got {:?}", TIMEOUT_ENV, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
