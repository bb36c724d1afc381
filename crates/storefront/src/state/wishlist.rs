//! Wishlist state container.
//!
//! A durable, cross-visit set of liked product IDs, kept on this device
//! regardless of authentication state. The persisted form is a JSON array of
//! ID strings under [`keys::WISHLIST`]; full product data is never persisted
//! and is re-fetched from the gateway whenever the ID set changes.
//!
//! Lifecycle: `Hydrating` (reading storage) -> `Ready` (IDs known, fetch in
//! flight) -> `Resolved` (products available). Mutations after hydration
//! move Resolved -> Ready -> Resolved without re-reading storage.

use std::sync::Arc;

use bold_type_core::Product;

use crate::gateway::CatalogGateway;
use crate::storage::{KeyValueStore, keys};

/// Wishlist lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hydrating,
    Ready,
    Resolved,
}

/// The wishlist container.
///
/// Call [`Wishlist::hydrate`] once at startup before mutating; mutations
/// during hydration are not persisted, so the persisted set cannot be
/// clobbered by a half-loaded container.
pub struct Wishlist<G> {
    gateway: G,
    storage: Arc<dyn KeyValueStore>,
    ids: Vec<String>,
    products: Vec<Product>,
    phase: Phase,
}

impl<G: CatalogGateway> Wishlist<G> {
    #[must_use]
    pub fn new(gateway: G, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            storage,
            ids: Vec::new(),
            products: Vec::new(),
            phase: Phase::Hydrating,
        }
    }

    /// Load the persisted ID set and resolve it into products.
    ///
    /// Absent or unparseable persisted data is treated as an empty set.
    /// Duplicates in the stored array (hand-edited or from an older build)
    /// are dropped on the way in, preserving first-seen order.
    pub async fn hydrate(&mut self) {
        let mut ids: Vec<String> = match self.storage.get(keys::WISHLIST) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable wishlist data");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut seen = Vec::with_capacity(ids.len());
        ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });

        self.ids = ids;
        self.phase = Phase::Ready;
        self.resolve().await;
    }

    /// Add an ID if absent. Duplicate adds are no-ops.
    pub async fn add_item(&mut self, product_id: &str) {
        if self.ids.iter().any(|id| id == product_id) {
            return;
        }
        self.ids.push(product_id.to_string());
        self.committed().await;
    }

    /// Remove an ID if present. No-op if absent.
    pub async fn remove_item(&mut self, product_id: &str) {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        if self.ids.len() == before {
            return;
        }
        self.committed().await;
    }

    /// Flip an ID's membership. Returns whether it is present afterwards.
    pub async fn toggle_item(&mut self, product_id: &str) -> bool {
        if self.is_in_wishlist(product_id) {
            self.remove_item(product_id).await;
            false
        } else {
            self.add_item(product_id).await;
            true
        }
    }

    /// Empty the set. Clears the resolved products without a fetch.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
        self.products.clear();
        self.phase = Phase::Resolved;
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// The ID set, insertion order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.ids
    }

    /// Resolved products for display.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// True until hydration has read persisted storage.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Hydrating
    }

    /// Persist-then-resolve, shared by every successful mutation.
    async fn committed(&mut self) {
        self.persist();
        self.phase = Phase::Ready;
        self.resolve().await;
    }

    /// Serialize the ID set to storage under the fixed wishlist key.
    ///
    /// Skipped while hydrating: a mutation racing the initial load must not
    /// overwrite the persisted set before it has been read.
    fn persist(&self) {
        if self.phase == Phase::Hydrating {
            return;
        }

        match serde_json::to_string(&self.ids) {
            Ok(json) => self.storage.set(keys::WISHLIST, &json),
            Err(e) => tracing::error!(error = %e, "Failed to serialize wishlist"),
        }
    }

    /// Replace the product list wholesale from the current ID set.
    ///
    /// An empty set short-circuits without a network call. A failed fetch
    /// keeps the previous product list so the page still shows something.
    async fn resolve(&mut self) {
        if self.ids.is_empty() {
            self.products.clear();
            self.phase = Phase::Resolved;
            return;
        }

        match self.gateway.products_by_ids(&self.ids).await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve wishlist products");
            }
        }
        self.phase = Phase::Resolved;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use rust_decimal::Decimal;

    use crate::shopify::{GraphQLError, ShopifyError};
    use crate::storage::MemoryStore;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            handle: format!("handle-{id}"),
            title: format!("Product {id}"),
            description: String::new(),
            description_html: String::new(),
            price: Decimal::from(48),
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

    /// Resolves every requested ID to a stub product; can be switched to
    /// fail to exercise the degraded path.
    #[derive(Clone, Default)]
    struct StubCatalog {
        fail: Arc<AtomicBool>,
        batches: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl CatalogGateway for StubCatalog {
        async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, ShopifyError> {
            self.batches
                .lock()
                .unwrap()
                .push(ids.to_vec());
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopifyError::GraphQL(vec![GraphQLError::new("offline")]));
            }
            Ok(ids.iter().map(|id| product(id)).collect())
        }

        async fn search_products(
            &self,
            _query: &str,
            _first: u32,
        ) -> Result<Vec<Product>, ShopifyError> {
            Ok(Vec::new())
        }
    }

    fn wishlist() -> (Wishlist<StubCatalog>, StubCatalog, Arc<MemoryStore>) {
        let catalog = StubCatalog::default();
        let store = Arc::new(MemoryStore::new());
        let list = Wishlist::new(catalog.clone(), Arc::clone(&store) as _);
        (list, catalog, store)
    }

    #[tokio::test]
    async fn test_hydrate_empty_storage() {
        let (mut list, catalog, _store) = wishlist();
        assert!(list.is_loading());

        list.hydrate().await;

        assert!(!list.is_loading());
        assert!(list.items().is_empty());
        assert!(list.products().is_empty());
        // Empty set resolves without a network call.
        assert!(catalog.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_twice_returns_to_empty() {
        let (mut list, _catalog, store) = wishlist();
        list.hydrate().await;

        assert!(list.toggle_item("gid-1").await);
        assert!(!list.toggle_item("gid-1").await);

        assert!(list.items().is_empty());
        assert!(list.products().is_empty());
        assert_eq!(store.get(keys::WISHLIST), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_noop() {
        let (mut list, catalog, _store) = wishlist();
        list.hydrate().await;

        list.add_item("gid-1").await;
        list.add_item("gid-1").await;
        list.add_item("gid-1").await;

        assert_eq!(list.items(), ["gid-1".to_string()]);
        // The two duplicate adds never re-fetched.
        assert_eq!(catalog.batches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_odd_toggles_leave_one_occurrence() {
        let (mut list, _catalog, _store) = wishlist();
        list.hydrate().await;

        for _ in 0..5 {
            list.toggle_item("gid-1").await;
        }

        assert_eq!(
            list.items().iter().filter(|id| *id == "gid-1").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let (mut list, _catalog, store) = wishlist();
        list.hydrate().await;
        list.toggle_item("gid-1").await;
        list.toggle_item("gid-2").await;
        list.toggle_item("gid-1").await;
        list.toggle_item("gid-1").await;

        // Fresh container over the same store sees the same set.
        let mut reloaded = Wishlist::new(StubCatalog::default(), Arc::clone(&store) as _);
        reloaded.hydrate().await;

        assert_eq!(reloaded.items(), list.items());
        assert_eq!(reloaded.items().len(), 2);
        assert!(reloaded.is_in_wishlist("gid-1"));
        assert!(reloaded.is_in_wishlist("gid-2"));
    }

    #[tokio::test]
    async fn test_malformed_storage_treated_as_empty() {
        let (mut list, _catalog, store) = wishlist();
        store.set(keys::WISHLIST, "{\"not\": \"an array\"}");

        list.hydrate().await;

        assert!(list.items().is_empty());
        // The container is usable afterwards.
        list.add_item("gid-1").await;
        assert_eq!(store.get(keys::WISHLIST), Some("[\"gid-1\"]".to_string()));
    }

    #[tokio::test]
    async fn test_hydrate_dedups_corrupted_duplicates() {
        let (mut list, _catalog, store) = wishlist();
        store.set(keys::WISHLIST, "[\"gid-1\",\"gid-2\",\"gid-1\"]");

        list.hydrate().await;

        assert_eq!(list.items(), ["gid-1".to_string(), "gid-2".to_string()]);
    }

    #[tokio::test]
    async fn test_resolution_failure_keeps_previous_products() {
        let (mut list, catalog, _store) = wishlist();
        list.hydrate().await;
        list.add_item("gid-1").await;
        assert_eq!(list.products().len(), 1);

        catalog.fail.store(true, Ordering::SeqCst);
        list.add_item("gid-2").await;

        // Fetch failed; the display list is stale but present.
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.products().len(), 1);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_clear_persists_and_skips_fetch() {
        let (mut list, catalog, store) = wishlist();
        list.hydrate().await;
        list.add_item("gid-1").await;
        let fetches_before = catalog.batches.lock().unwrap().len();

        list.clear();

        assert!(list.items().is_empty());
        assert!(list.products().is_empty());
        assert_eq!(store.get(keys::WISHLIST), Some("[]".to_string()));
        assert_eq!(catalog.batches.lock().unwrap().len(), fetches_before);
    }
}
