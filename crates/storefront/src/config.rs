//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `PRODUCT_API_URL` - Product API base URL (default: <https://dummyjson.com>)
//! - `PRODUCT_CATEGORY` - Upstream category the menu is loaded from (default: groceries)
//! - `PRODUCT_API_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `CUSTOMER_USERNAME` / `CUSTOMER_PASSWORD` - Customer login pair
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Admin login pair
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use foodverse_core::{Credentials, FixedCredentials};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product API configuration
    pub products: ProductApiConfig,
    /// Login pairs
    pub auth: AuthConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Product API configuration.
#[derive(Debug, Clone)]
pub struct ProductApiConfig {
    /// Base URL; `/products/...` paths are appended to it
    pub base_url: Url,
    /// Upstream category the menu is loaded from
    pub category: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// Login credentials for both roles.
///
/// Passwords are held as `SecretString` and redacted in `Debug`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub customer: Credentials,
    pub admin: Credentials,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            customer: Credentials::new(
                FixedCredentials::DEFAULT_CUSTOMER_USERNAME,
                FixedCredentials::DEFAULT_CUSTOMER_PASSWORD,
            ),
            admin: Credentials::new(
                FixedCredentials::DEFAULT_ADMIN_USERNAME,
                FixedCredentials::DEFAULT_ADMIN_PASSWORD,
            ),
        }
    }
}

impl AuthConfig {
    /// Verifier over the configured pairs.
    #[must_use]
    pub fn authenticator(&self) -> FixedCredentials {
        FixedCredentials::new(self.customer.clone(), self.admin.clone())
    }
}

const DEFAULT_PRODUCT_API_URL: &str = "https://dummyjson.com";
const DEFAULT_PRODUCT_CATEGORY: &str = "groceries";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value or
    /// only one half of a login pair is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parse_or("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("STOREFRONT_PORT", 3000u16)?;

        let products = ProductApiConfig {
            base_url: parse_base_url(&env.or_default("PRODUCT_API_URL", DEFAULT_PRODUCT_API_URL))?,
            category: env.or_default("PRODUCT_CATEGORY", DEFAULT_PRODUCT_CATEGORY),
            request_timeout: Duration::from_secs(
                env.parse_or("PRODUCT_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            ),
        };

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            customer: env
                .credentials("CUSTOMER_USERNAME", "CUSTOMER_PASSWORD")?
                .unwrap_or(defaults.customer),
            admin: env
                .credentials("ADMIN_USERNAME", "ADMIN_PASSWORD")?
                .unwrap_or(defaults.admin),
        };

        let sentry_sample_rate = env.sample_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = env.sample_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            products,
            auth,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// A sample rate in `0.0..=1.0`.
    fn sample_rate(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let rate = self.parse_or(key, default)?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {rate})"),
            ))
        }
    }

    /// A username/password pair. Both or neither must be set.
    fn credentials(&self, user_key: &str, pass_key: &str) -> Result<Option<Credentials>, ConfigError> {
        match (self.optional(user_key), self.optional(pass_key)) {
            (Some(username), Some(password)) => Ok(Some(Credentials::new(
                username,
                SecretString::from(password),
            ))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(pass_key.to_string())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar(user_key.to_string())),
        }
    }
}

/// Parse and validate the product API base URL.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("PRODUCT_API_URL".to_string(), msg);

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("must be an absolute URL with a host".to_string()));
    }
    Ok(url)
}
