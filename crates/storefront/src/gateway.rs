//! Gateway trait seams for the state containers.
//!
//! The containers never talk to [`crate::shopify::ShopifyClient`] directly;
//! they are generic over these traits so tests can run them against
//! in-memory mocks. `ShopifyClient` implements both.

use std::future::Future;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use bold_type_core::{Customer, Order, Product};

use crate::shopify::ShopifyError;

/// Catalog reads the wishlist and search containers depend on.
pub trait CatalogGateway {
    /// Batch-fetch products by gateway ID. Unknown IDs are skipped, not
    /// errors; an empty input must resolve to an empty list without a
    /// network call.
    fn products_by_ids(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<Product>, ShopifyError>> + Send;

    /// Full-text product search, limited to `first` results.
    fn search_products(
        &self,
        query: &str,
        first: u32,
    ) -> impl Future<Output = Result<Vec<Product>, ShopifyError>> + Send;
}

/// Account operations the customer session container depends on.
pub trait CustomerGateway {
    /// Exchange credentials for a bearer token. Gateway-reported problems
    /// (bad password, locked account) surface as
    /// [`ShopifyError::UserError`] carrying the first reported message.
    fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<CustomerToken, ShopifyError>> + Send;

    /// Create an account. Does not yield a token; callers follow with
    /// [`Self::customer_login`].
    fn customer_register(
        &self,
        input: &RegisterInput,
    ) -> impl Future<Output = Result<(), ShopifyError>> + Send;

    /// Revoke a bearer token.
    fn customer_logout(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<(), ShopifyError>> + Send;

    /// Trigger a password-recovery email.
    fn customer_recover(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<(), ShopifyError>> + Send;

    /// Fetch the customer a token belongs to. A revoked or unknown token
    /// yields `Ok(None)`, not an error.
    fn get_customer(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<Customer>, ShopifyError>> + Send;

    /// Fetch the customer's order history, most recent first.
    fn get_customer_orders(
        &self,
        access_token: &str,
        first: u32,
    ) -> impl Future<Output = Result<Vec<Order>, ShopifyError>> + Send;
}

/// A customer bearer token with its validity window.
///
/// Both fields travel together: the session container persists and clears
/// them as a unit.
#[derive(Debug, Clone)]
pub struct CustomerToken {
    /// The bearer token itself. Redacted in `Debug` output.
    pub access_token: SecretString,
    /// ISO-8601 expiry as the gateway reported it.
    pub expires_at: String,
}

impl CustomerToken {
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_at: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            expires_at: expires_at.into(),
        }
    }

    /// The token string, for persistence and request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Parse the expiry timestamp. Garbled expiries parse to `None` and are
    /// treated as already expired by callers.
    #[must_use]
    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_expiry(&self.expires_at)
    }
}

/// Parse an ISO-8601 expiry string.
#[must_use]
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Profile submitted at account creation.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_token_debug_redacts() {
        let token = CustomerToken::new("super-sekrit-bearer", "2026-01-01T00:00:00Z");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-sekrit-bearer"));
        assert!(debug.contains("2026-01-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_expiry() {
        assert!(parse_expiry("2026-01-01T00:00:00Z").is_some());
        assert!(parse_expiry("2026-01-01T00:00:00+02:00").is_some());
        assert!(parse_expiry("soon").is_none());
        assert!(parse_expiry("").is_none());
    }
}
