//! Shopify Storefront API client implementation.
//!
//! Hand-written GraphQL over `reqwest`, decoded with `serde`. Catalog reads
//! are cached with `moka` (5-minute TTL); search, by-id lookups, and
//! customer-scoped operations always go to the network.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use bold_type_core::{Collection, Customer, Order, Product};

use crate::config::ShopifyConfig;
use crate::gateway::{CatalogGateway, CustomerGateway, CustomerToken, RegisterInput};
use crate::shopify::{GraphQLError, ShopifyError};

use super::cache::CacheValue;
use super::conversions::{
    normalize_collection, normalize_customer, normalize_order, normalize_product,
};
use super::queries;
use super::types::{
    Connection, ProductSortKey, RawAccessToken, RawCollection, RawCustomer, RawOrder, RawProduct,
    RawUserError,
};

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

// =============================================================================
// GraphQL plumbing
// =============================================================================

#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

/// Take the first user error's message, the one the reference UI surfaces.
fn first_user_error(errors: &[RawUserError]) -> Option<ShopifyError> {
    errors
        .first()
        .map(|e| ShopifyError::UserError(e.message.clone()))
}

// =============================================================================
// ShopifyClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides access to products, collections, search, and customer account
/// operations. Cheaply cloneable; clones share the HTTP pool and cache.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<String, CacheValue>,
}

impl ShopifyClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ShopifyClientInner {
                client: reqwest::Client::new(),
                endpoint: config.graphql_endpoint(),
                access_token: config.storefront_access_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let request = GraphQLRequest { query, variables };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::new(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError::new(e.message))
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError::new("No data in response")])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product listing with sort key and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: u32,
        sort_key: ProductSortKey,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = format!("products:{first}:{}:{reverse}", sort_key.as_str());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        #[derive(Deserialize)]
        struct Data {
            products: Connection<RawProduct>,
        }

        let data: Data = self
            .execute(
                &queries::get_products(),
                serde_json::json!({
                    "first": first,
                    "sortKey": sort_key.as_str(),
                    "reverse": reverse,
                }),
            )
            .await?;

        let products: Vec<Product> = data
            .products
            .into_nodes()
            .into_iter()
            .map(normalize_product)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its handle. Unknown handles yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Product>, ShopifyError> {
        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        #[derive(Deserialize)]
        struct Data {
            product: Option<RawProduct>,
        }

        let data: Data = self
            .execute(
                &queries::get_product_by_handle(),
                serde_json::json!({ "handle": handle }),
            )
            .await?;

        let Some(product) = data.product.map(normalize_product) else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(Some(product))
    }

    /// Batch-fetch products by gateway ID (wishlist resolution).
    ///
    /// IDs the gateway no longer knows come back as null nodes and are
    /// skipped. An empty input resolves locally without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_products_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<Product>, ShopifyError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(Deserialize)]
        struct Data {
            nodes: Vec<Option<RawProduct>>,
        }

        let data: Data = self
            .execute(
                &queries::get_products_by_ids(),
                serde_json::json!({ "ids": ids }),
            )
            .await?;

        Ok(data
            .nodes
            .into_iter()
            .flatten()
            .map(normalize_product)
            .collect())
    }

    /// Full-text product search. Blank queries resolve locally to no hits.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_products(
        &self,
        query: &str,
        first: u32,
    ) -> Result<Vec<Product>, ShopifyError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        #[derive(Deserialize)]
        struct Data {
            search: Connection<RawProduct>,
        }

        let data: Data = self
            .execute(
                &queries::search_products(),
                serde_json::json!({ "query": query, "first": first }),
            )
            .await?;

        Ok(data
            .search
            .into_nodes()
            .into_iter()
            .map(normalize_product)
            .collect())
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection by handle with its nested product listing.
    /// Unknown handles yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        first: u32,
        sort_key: ProductSortKey,
        reverse: bool,
    ) -> Result<Option<Collection>, ShopifyError> {
        let cache_key = format!("collection:{handle}:{first}:{}:{reverse}", sort_key.as_str());

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(Some(*collection));
        }

        #[derive(Deserialize)]
        struct Data {
            collection: Option<RawCollection>,
        }

        let data: Data = self
            .execute(
                &queries::get_collection_products(),
                serde_json::json!({
                    "handle": handle,
                    "first": first,
                    "sortKey": sort_key.as_str(),
                    "reverse": reverse,
                }),
            )
            .await?;

        let Some(collection) = data.collection.map(normalize_collection) else {
            return Ok(None);
        };

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(Some(collection))
    }

    /// Get the collection listing, metadata only.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self, first: u32) -> Result<Vec<Collection>, ShopifyError> {
        let cache_key = format!("collections:{first}");

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        #[derive(Deserialize)]
        struct Data {
            collections: Connection<RawCollection>,
        }

        let data: Data = self
            .execute(
                queries::GET_COLLECTIONS,
                serde_json::json!({ "first": first }),
            )
            .await?;

        let collections: Vec<Collection> = data
            .collections
            .into_nodes()
            .into_iter()
            .map(normalize_collection)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    // =========================================================================
    // Customer Methods (never cached - credential-scoped)
    // =========================================================================

    /// Exchange credentials for a customer access token.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` with the gateway's first reported
    /// message for rejected credentials, or other variants for transport
    /// failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerToken, ShopifyError> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "customerAccessTokenCreate")]
            token_create: TokenCreatePayload,
        }

        #[derive(Deserialize)]
        struct TokenCreatePayload {
            #[serde(rename = "customerAccessToken")]
            customer_access_token: Option<RawAccessToken>,
            #[serde(rename = "customerUserErrors")]
            customer_user_errors: Vec<RawUserError>,
        }

        let data: Data = self
            .execute(
                queries::CUSTOMER_ACCESS_TOKEN_CREATE,
                serde_json::json!({
                    "input": { "email": email, "password": password }
                }),
            )
            .await?;

        if let Some(err) = first_user_error(&data.token_create.customer_user_errors) {
            return Err(err);
        }

        data.token_create
            .customer_access_token
            .map(|token| CustomerToken::new(token.access_token, token.expires_at))
            .ok_or_else(|| {
                ShopifyError::GraphQL(vec![GraphQLError::new("Failed to create access token")])
            })
    }

    /// Create a customer account. Yields no token; follow with
    /// [`Self::customer_login`].
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` for validation failures (duplicate
    /// email, weak password) or other variants for transport failures.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn customer_register(&self, input: &RegisterInput) -> Result<(), ShopifyError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateInput<'a> {
            email: &'a str,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            first_name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            last_name: Option<&'a str>,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "customerCreate")]
            customer_create: CreatePayload,
        }

        #[derive(Deserialize)]
        struct CreatePayload {
            customer: Option<CreatedCustomer>,
            #[serde(rename = "customerUserErrors")]
            customer_user_errors: Vec<RawUserError>,
        }

        #[derive(Deserialize)]
        struct CreatedCustomer {
            #[allow(dead_code)]
            id: String,
        }

        let variables = serde_json::json!({
            "input": CreateInput {
                email: &input.email,
                password: &input.password,
                first_name: input.first_name.as_deref(),
                last_name: input.last_name.as_deref(),
            }
        });

        let data: Data = self.execute(queries::CUSTOMER_CREATE, variables).await?;

        if let Some(err) = first_user_error(&data.customer_create.customer_user_errors) {
            return Err(err);
        }

        if data.customer_create.customer.is_none() {
            return Err(ShopifyError::GraphQL(vec![GraphQLError::new(
                "Failed to create customer",
            )]));
        }

        Ok(())
    }

    /// Revoke a customer access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the revocation fails; callers signing out locally
    /// treat this as best-effort.
    #[instrument(skip(self, access_token))]
    pub async fn customer_logout(&self, access_token: &str) -> Result<(), ShopifyError> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "customerAccessTokenDelete")]
            token_delete: TokenDeletePayload,
        }

        #[derive(Deserialize)]
        struct TokenDeletePayload {
            #[serde(rename = "userErrors")]
            user_errors: Vec<RawUserError>,
        }

        let data: Data = self
            .execute(
                queries::CUSTOMER_ACCESS_TOKEN_DELETE,
                serde_json::json!({ "customerAccessToken": access_token }),
            )
            .await?;

        if let Some(err) = first_user_error(&data.token_delete.user_errors) {
            return Err(err);
        }

        Ok(())
    }

    /// Trigger a password-recovery email.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::UserError` when the gateway rejects the
    /// address, or other variants for transport failures.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn customer_recover(&self, email: &str) -> Result<(), ShopifyError> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "customerRecover")]
            recover: RecoverPayload,
        }

        #[derive(Deserialize)]
        struct RecoverPayload {
            #[serde(rename = "customerUserErrors")]
            customer_user_errors: Vec<RawUserError>,
        }

        let data: Data = self
            .execute(
                queries::CUSTOMER_RECOVER,
                serde_json::json!({ "email": email }),
            )
            .await?;

        if let Some(err) = first_user_error(&data.recover.customer_user_errors) {
            return Err(err);
        }

        Ok(())
    }

    /// Fetch the customer a token belongs to. A revoked or unknown token
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, access_token))]
    pub async fn get_customer(
        &self,
        access_token: &str,
    ) -> Result<Option<Customer>, ShopifyError> {
        #[derive(Deserialize)]
        struct Data {
            customer: Option<RawCustomer>,
        }

        let data: Data = self
            .execute(
                queries::GET_CUSTOMER,
                serde_json::json!({ "customerAccessToken": access_token }),
            )
            .await?;

        Ok(data.customer.map(normalize_customer))
    }

    /// Fetch the customer's order history, most recent first. An invalid
    /// token yields an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, access_token))]
    pub async fn get_customer_orders(
        &self,
        access_token: &str,
        first: u32,
    ) -> Result<Vec<Order>, ShopifyError> {
        #[derive(Deserialize)]
        struct Data {
            customer: Option<CustomerOrders>,
        }

        #[derive(Deserialize)]
        struct CustomerOrders {
            orders: Connection<RawOrder>,
        }

        let data: Data = self
            .execute(
                queries::GET_CUSTOMER_ORDERS,
                serde_json::json!({ "customerAccessToken": access_token, "first": first }),
            )
            .await?;

        Ok(data
            .customer
            .map(|customer| {
                customer
                    .orders
                    .into_nodes()
                    .into_iter()
                    .map(normalize_order)
                    .collect()
            })
            .unwrap_or_default())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Gateway trait impls
// =============================================================================

impl CatalogGateway for ShopifyClient {
    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ShopifyError> {
        self.get_products_by_ids(ids).await
    }

    async fn search_products(
        &self,
        query: &str,
        first: u32,
    ) -> Result<Vec<Product>, ShopifyError> {
        Self::search_products(self, query, first).await
    }
}

impl CustomerGateway for ShopifyClient {
    async fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerToken, ShopifyError> {
        Self::customer_login(self, email, password).await
    }

    async fn customer_register(&self, input: &RegisterInput) -> Result<(), ShopifyError> {
        Self::customer_register(self, input).await
    }

    async fn customer_logout(&self, access_token: &str) -> Result<(), ShopifyError> {
        Self::customer_logout(self, access_token).await
    }

    async fn customer_recover(&self, email: &str) -> Result<(), ShopifyError> {
        Self::customer_recover(self, email).await
    }

    async fn get_customer(&self, access_token: &str) -> Result<Option<Customer>, ShopifyError> {
        Self::get_customer(self, access_token).await
    }

    async fn get_customer_orders(
        &self,
        access_token: &str,
        first: u32,
    ) -> Result<Vec<Order>, ShopifyError> {
        Self::get_customer_orders(self, access_token, first).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offline_client() -> ShopifyClient {
        // Points at nothing; only good for paths that return before any
        // request is issued.
        ShopifyClient::new(&ShopifyConfig {
            store_domain: "unreachable.invalid".to_string(),
            api_version: "2025-01".to_string(),
            storefront_access_token: "a1b2c3d4e5f60718293a4b5c6d7e8f90".to_string(),
        })
    }

    #[tokio::test]
    async fn test_empty_id_batch_short_circuits() {
        let client = offline_client();
        let products = client.get_products_by_ids(&[]).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_short_circuits() {
        let client = offline_client();
        assert!(client.search_products("", 20).await.unwrap().is_empty());
        assert!(client.search_products("   ", 20).await.unwrap().is_empty());
    }
}
