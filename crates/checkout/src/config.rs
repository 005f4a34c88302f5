//! Checkout service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHECKOUT_HOST` - Bind address (default: 127.0.0.1)
//! - `CHECKOUT_PORT` - Listen port (default: 3000)
//! - `CHECKOUT_DATA_DIR` - Directory holding `zones.json` and
//!   `products.json` (default: crates/checkout/data)
//! - `CHECKOUT_NONCE_TTL_SECS` - Lifetime of final-cost nonces
//!   (default: 600)
//! - `CHECKOUT_SHIPPING_TAX_RATE` - Tax rate applied to the standard
//!   shipping quote, e.g. 0.1 (default: 0)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout service configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the zone and product catalog files
    pub data_dir: PathBuf,
    /// Lifetime of final-cost nonces
    pub nonce_ttl: Duration,
    /// Tax rate applied to the standard shipping quote
    pub shipping_tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("CHECKOUT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("CHECKOUT_PORT", "3000")?;
        let data_dir =
            PathBuf::from(get_env_or_default("CHECKOUT_DATA_DIR", "crates/checkout/data"));
        let nonce_ttl_secs: u64 = parse_env_or_default("CHECKOUT_NONCE_TTL_SECS", "600")?;
        let shipping_tax_rate = parse_env_or_default("CHECKOUT_SHIPPING_TAX_RATE", "0")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            data_dir,
            nonce_ttl: Duration::from_secs(nonce_ttl_secs),
            shipping_tax_rate,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path to the shipping zone catalog file.
    #[must_use]
    pub fn zones_path(&self) -> PathBuf {
        self.data_dir.join("zones.json")
    }

    /// Path to the product catalog file.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable with a default value.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = CheckoutConfig {
            host: "127.0.0.1".parse().expect("valid ip"),
            port: 3000,
            data_dir: PathBuf::from("data"),
            nonce_ttl: Duration::from_secs(600),
            shipping_tax_rate: Decimal::ZERO,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_catalog_paths() {
        let config = CheckoutConfig {
            host: "127.0.0.1".parse().expect("valid ip"),
            port: 3000,
            data_dir: PathBuf::from("/srv/checkout"),
            nonce_ttl: Duration::from_secs(600),
            shipping_tax_rate: Decimal::ZERO,
            sentry_dsn: None,
        };

        assert_eq!(config.zones_path(), PathBuf::from("/srv/checkout/zones.json"));
        assert_eq!(
            config.products_path(),
            PathBuf::from("/srv/checkout/products.json")
        );
    }
}
