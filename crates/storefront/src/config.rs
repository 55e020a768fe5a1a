//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (http or https)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `RECENTLY_VIEWED_LIMIT` - Products kept in a visitor's history (default: 20,
//!   at most [`MAX_RECENTLY_VIEWED_LIMIT`])
//! - `SESSION_EXPIRY_HOURS` - Cart session inactivity timeout (default: 168)
//! - `STOREFRONT_ASSETS_DIR` - Directory holding `static/` and `content/`
//!   (default: crates/storefront)
//! - `INQUIRY_WEBHOOK_URL` - Endpoint receiving connect form submissions as JSON
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use oakline_core::recently_viewed::DEFAULT_CAPACITY;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Largest history a visitor cookie can always hold.
///
/// A full history of the longest ids (`-2147483648`) still encodes well under
/// the cookie value limit.
pub const MAX_RECENTLY_VIEWED_LIMIT: usize = 200;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the inquiry webhook.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Maximum number of recently viewed products remembered per visitor
    pub recently_viewed_limit: usize,
    /// Hours of inactivity before a cart session expires
    pub session_expiry_hours: i64,
    /// Directory holding `static/` and `content/`
    pub assets_dir: PathBuf,
    /// Webhook receiving connect form submissions (may embed a token)
    pub inquiry_webhook_url: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("recently_viewed_limit", &self.recently_viewed_limit)
            .field("session_expiry_hours", &self.session_expiry_hours)
            .field("assets_dir", &self.assets_dir)
            .field(
                "inquiry_webhook_url",
                &self.inquiry_webhook_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        validate_base_url(&base_url)?;

        let recently_viewed_limit = parse_env_or_default::<usize>(
            "RECENTLY_VIEWED_LIMIT",
            &DEFAULT_CAPACITY.to_string(),
        )?;
        validate_recently_viewed_limit(recently_viewed_limit)?;

        let session_expiry_hours = parse_env_or_default::<i64>("SESSION_EXPIRY_HOURS", "168")?;
        if session_expiry_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SESSION_EXPIRY_HOURS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let assets_dir =
            PathBuf::from(get_env_or_default("STOREFRONT_ASSETS_DIR", "crates/storefront"));

        let inquiry_webhook_url = get_optional_env("INQUIRY_WEBHOOK_URL")
            .map(|url| {
                Url::parse(&url).map_err(|e| {
                    ConfigError::InvalidEnvVar("INQUIRY_WEBHOOK_URL".to_string(), e.to_string())
                })?;
                Ok::<_, ConfigError>(SecretString::from(url))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            base_url,
            recently_viewed_limit,
            session_expiry_hours,
            assets_dir,
            inquiry_webhook_url,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Directory served under `/static`.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.assets_dir.join("static")
    }

    /// Directory holding markdown pages.
    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.assets_dir.join("content")
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// The base URL must be an absolute http(s) URL with a host.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), reason);

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("must have a host".to_string()));
    }
    Ok(())
}

fn validate_recently_viewed_limit(limit: usize) -> Result<(), ConfigError> {
    if (1..=MAX_RECENTLY_VIEWED_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "RECENTLY_VIEWED_LIMIT".to_string(),
            format!("must be between 1 and {MAX_RECENTLY_VIEWED_LIMIT}"),
        ))
    }
}
