//! Integration tests for Bold Type.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bold-type-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart container scenarios
//! - `storefront_wishlist` - Wishlist persistence and resolution
//! - `storefront_session` - Customer session lifecycle
//! - `storefront_search` - Debounce and response-ordering behavior
//!
//! This library holds the shared fakes: an in-memory catalog and an
//! in-memory account registry implementing the storefront's gateway traits,
//! plus fixture builders. No network, no real store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;

use bold_type_core::{Customer, Order, Product};
use bold_type_storefront::gateway::{
    CatalogGateway, CustomerGateway, CustomerToken, RegisterInput,
};
use bold_type_storefront::shopify::{GraphQLError, ShopifyError};

/// Opt into log output during test runs via `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build a minimal normalized product fixture.
#[must_use]
pub fn sample_product(id: &str, title: &str, price: i64) -> Product {
    Product {
        id: id.to_string(),
        handle: title.to_lowercase().replace(' ', "-"),
        title: title.to_string(),
        description: String::new(),
        description_html: String::new(),
        price: Decimal::from(price),
        compare_at_price: None,
        currency_code: "USD".to_string(),
        image: None,
        images: Vec::new(),
        tags: Vec::new(),
        product_type: String::new(),
        available_for_sale: true,
        variants: Vec::new(),
        sizes: Vec::new(),
        colors: Vec::new(),
    }
}

fn offline_error() -> ShopifyError {
    ShopifyError::GraphQL(vec![GraphQLError::new("gateway unreachable")])
}

// =============================================================================
// MockCatalog
// =============================================================================

/// In-memory catalog implementing [`CatalogGateway`].
///
/// Seed it with products, then point containers at a clone. Batch lookups
/// and searches are recorded for assertions; `set_offline` makes every call
/// fail, and `set_search_latency` delays a specific query's response to
/// exercise out-of-order delivery.
#[derive(Clone, Default)]
pub struct MockCatalog {
    products: Arc<Mutex<Vec<Product>>>,
    id_batches: Arc<Mutex<Vec<Vec<String>>>>,
    searches: Arc<Mutex<Vec<String>>>,
    search_latency: Arc<Mutex<HashMap<String, Duration>>>,
    offline: Arc<AtomicBool>,
}

impl MockCatalog {
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            ..Self::default()
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_search_latency(&self, query: &str, latency: Duration) {
        lock(&self.search_latency).insert(query.to_string(), latency);
    }

    /// Every batch of IDs requested so far.
    #[must_use]
    pub fn id_batches(&self) -> Vec<Vec<String>> {
        lock(&self.id_batches).clone()
    }

    /// Every search query issued so far.
    #[must_use]
    pub fn searches(&self) -> Vec<String> {
        lock(&self.searches).clone()
    }
}

impl CatalogGateway for MockCatalog {
    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ShopifyError> {
        lock(&self.id_batches).push(ids.to_vec());
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline_error());
        }

        let products = lock(&self.products);
        // Unknown IDs come back as null nodes from the gateway: skipped.
        Ok(ids
            .iter()
            .filter_map(|id| products.iter().find(|p| &p.id == id).cloned())
            .collect())
    }

    async fn search_products(
        &self,
        query: &str,
        first: u32,
    ) -> Result<Vec<Product>, ShopifyError> {
        let latency = {
            lock(&self.searches).push(query.to_string());
            lock(&self.search_latency).get(query).copied()
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline_error());
        }

        let needle = query.to_lowercase();
        let products = lock(&self.products);
        Ok(products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .take(first as usize)
            .cloned()
            .collect())
    }
}

// =============================================================================
// MockAccounts
// =============================================================================

struct AccountRecord {
    password: String,
    customer: Customer,
    orders: Vec<Order>,
}

struct AccountsState {
    accounts: HashMap<String, AccountRecord>,
    /// token -> email
    tokens: HashMap<String, String>,
    issued: u64,
}

/// In-memory account registry implementing [`CustomerGateway`].
///
/// Tokens are issued with a configurable lifetime and honored until revoked;
/// `set_offline` turns every operation into a transport failure.
#[derive(Clone)]
pub struct MockAccounts {
    state: Arc<Mutex<AccountsState>>,
    token_ttl: chrono::Duration,
    offline: Arc<AtomicBool>,
}

impl Default for MockAccounts {
    fn default() -> Self {
        Self::new(chrono::Duration::hours(1))
    }
}

impl MockAccounts {
    #[must_use]
    pub fn new(token_ttl: chrono::Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(AccountsState {
                accounts: HashMap::new(),
                tokens: HashMap::new(),
                issued: 0,
            })),
            token_ttl,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Seed an existing account.
    pub fn seed_account(&self, email: &str, password: &str, first_name: Option<&str>) {
        let mut state = lock(&self.state);
        let id = format!("gid://shopify/Customer/{}", state.accounts.len() + 1);
        state.accounts.insert(
            email.to_string(),
            AccountRecord {
                password: password.to_string(),
                customer: Customer {
                    id,
                    email: email.to_string(),
                    first_name: first_name.map(str::to_string),
                    last_name: None,
                    phone: None,
                },
                orders: Vec::new(),
            },
        );
    }

    /// Attach an order to an account's history.
    pub fn seed_order(&self, email: &str, order: Order) {
        if let Some(account) = lock(&self.state).accounts.get_mut(email) {
            account.orders.push(order);
        }
    }

    /// Revoke every outstanding token, simulating server-side invalidation.
    pub fn revoke_all_tokens(&self) {
        lock(&self.state).tokens.clear();
    }

    /// Number of tokens the registry still honors.
    #[must_use]
    pub fn active_token_count(&self) -> usize {
        lock(&self.state).tokens.len()
    }
}

impl CustomerGateway for MockAccounts {
    async fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerToken, ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }

        let mut state = lock(&self.state);
        let valid = state
            .accounts
            .get(email)
            .is_some_and(|account| account.password == password);
        if !valid {
            // The message Shopify reports for any credential failure.
            return Err(ShopifyError::UserError("Unidentified customer".to_string()));
        }

        state.issued += 1;
        let token = format!("token-{}", state.issued);
        state.tokens.insert(token.clone(), email.to_string());

        let expires_at = (Utc::now() + self.token_ttl).to_rfc3339();
        Ok(CustomerToken::new(token, expires_at))
    }

    async fn customer_register(&self, input: &RegisterInput) -> Result<(), ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }

        if lock(&self.state).accounts.contains_key(&input.email) {
            return Err(ShopifyError::UserError(
                "Email has already been taken".to_string(),
            ));
        }

        self.seed_account(&input.email, &input.password, input.first_name.as_deref());
        Ok(())
    }

    async fn customer_logout(&self, access_token: &str) -> Result<(), ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }

        lock(&self.state).tokens.remove(access_token);
        Ok(())
    }

    async fn customer_recover(&self, _email: &str) -> Result<(), ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }
        Ok(())
    }

    async fn get_customer(&self, access_token: &str) -> Result<Option<Customer>, ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }

        let state = lock(&self.state);
        Ok(state
            .tokens
            .get(access_token)
            .and_then(|email| state.accounts.get(email))
            .map(|account| account.customer.clone()))
    }

    async fn get_customer_orders(
        &self,
        access_token: &str,
        first: u32,
    ) -> Result<Vec<Order>, ShopifyError> {
        if self.is_offline() {
            return Err(offline_error());
        }

        let state = lock(&self.state);
        Ok(state
            .tokens
            .get(access_token)
            .and_then(|email| state.accounts.get(email))
            .map(|account| account.orders.iter().take(first as usize).cloned().collect())
            .unwrap_or_default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
