//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents ([`queries`]) executed over `reqwest`,
//!   decoded into raw response shapes ([`types`]) with `serde`
//! - Shopify is source of truth - NO local sync, direct API calls
//! - [`conversions`] flattens raw shapes into `bold-type-core` view models
//! - In-memory caching via `moka` for catalog reads (5 minute TTL); search,
//!   by-id lookups, and everything customer-scoped are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use bold_type_storefront::shopify::ShopifyClient;
//!
//! let client = ShopifyClient::new(&config.shopify);
//!
//! // Get a product
//! let product = client.get_product_by_handle("im-not-arguing").await?;
//!
//! // Sign a customer in
//! let token = client.customer_login("pat@example.com", "hunter2").await?;
//! let customer = client.get_customer(token.expose()).await?;
//! ```

mod cache;
mod client;

pub mod conversions;
pub mod queries;
pub mod types;

pub use client::ShopifyClient;
pub use types::ProductSortKey;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from a mutation (e.g., invalid credentials).
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
}

impl GraphQLError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
