//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API public access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2025-01)
//! - `STOREFRONT_DATA_DIR` - Directory for durable client storage (default: ./data)
//! - `SEARCH_DEBOUNCE_MS` - Search debounce delay in milliseconds (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_API_VERSION: &str = "2025-01";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Placeholder value in {0}: {1}")]
    PlaceholderValue(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shopify Storefront API configuration
    pub shopify: ShopifyConfig,
    /// Directory holding durable client storage
    pub data_dir: PathBuf,
    /// Quiescent typing pause before a search request is issued
    pub search_debounce: Duration,
}

/// Shopify Storefront API configuration.
///
/// The access token here is the *public* Storefront API token (safe to ship
/// to a client), so no redaction is applied.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store_domain: String,
    /// Shopify API version (e.g., 2025-01)
    pub api_version: String,
    /// Storefront API public access token
    pub storefront_access_token: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token looks like an unfilled placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let shopify = ShopifyConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));
        let debounce_ms = match std::env::var("SEARCH_DEBOUNCE_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_SEARCH_DEBOUNCE_MS,
        };

        Ok(Self {
            shopify,
            data_dir,
            search_debounce: Duration::from_millis(debounce_ms),
        })
    }
}

impl ShopifyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let storefront_access_token = get_required_env("SHOPIFY_STOREFRONT_ACCESS_TOKEN")?;
        validate_not_placeholder(&storefront_access_token, "SHOPIFY_STOREFRONT_ACCESS_TOKEN")?;

        Ok(Self {
            store_domain: get_required_env("SHOPIFY_STORE_DOMAIN")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            storefront_access_token,
        })
    }

    /// The GraphQL endpoint this configuration points at.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a value is not an unfilled placeholder from a sample .env.
fn validate_not_placeholder(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::PlaceholderValue(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
