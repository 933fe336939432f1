//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `127.0.0.1:18080`)
//! - `BASE_URL` - Public origin used to build short links (default: `http://127.0.0.1:18080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CORS_MAX_AGE_SECONDS` - Preflight cache lifetime (default: 604800, one week)
//! - `MAX_FORM_BYTES` - Largest accepted urlencoded body (default: 16384)

use anyhow::{Context, Result};
use std::env;
use url::Url;

const DEFAULT_LISTEN: &str = "127.0.0.1:18080";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:18080";
const DEFAULT_CORS_MAX_AGE_SECONDS: u64 = 604_800;
const DEFAULT_MAX_FORM_BYTES: usize = 16 * 1024;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Externally visible origin; short links are `<base_url>/api/v1/<code>`.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub cors_max_age_seconds: u64,
    pub max_form_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cors_max_age_seconds: DEFAULT_CORS_MAX_AGE_SECONDS,
            max_form_bytes: DEFAULT_MAX_FORM_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let base_url = env::var("BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let cors_max_age_seconds = parse_var("CORS_MAX_AGE_SECONDS")?
            .unwrap_or(defaults.cors_max_age_seconds);
        let max_form_bytes = parse_var("MAX_FORM_BYTES")?.unwrap_or(defaults.max_form_bytes);

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            cors_max_age_seconds,
            max_form_bytes,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an absolute http(s) URL
    /// - `log_format` is not `text` or `json`
    /// - `max_form_bytes` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            anyhow::bail!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.max_form_bytes == 0 {
            anyhow::bail!("MAX_FORM_BYTES must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  CORS max age: {}s", self.cors_max_age_seconds);
        tracing::info!("  Max form size: {} bytes", self.max_form_bytes);
    }
}

/// Reads and parses an optional variable. Unset means `None`; set but
/// unparsable is an error.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: '{value}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
