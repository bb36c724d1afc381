//! Debounced product search.
//!
//! Each keystroke submits the whole query; a request is only issued after a
//! quiescent typing pause. A newer submission logically cancels a pending
//! timer (the sleeping task wakes, sees it has been superseded, and does
//! nothing). In-flight requests are never aborted; instead every response is
//! checked against the latest sequence number before publishing, so a slow
//! stale response can never clobber newer results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use bold_type_core::Product;

use crate::gateway::CatalogGateway;

const DEFAULT_RESULT_LIMIT: u32 = 20;

/// A published set of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Sequence number of the submission that produced these results.
    pub seq: u64,
    /// The query as submitted.
    pub query: String,
    pub products: Vec<Product>,
}

/// The debounced search container.
///
/// Results arrive over a `watch` channel: the view subscribes once and
/// re-renders whenever the value changes. Must be used inside a tokio
/// runtime (submissions spawn the timer task).
pub struct DebouncedSearch<G> {
    gateway: G,
    delay: Duration,
    limit: u32,
    latest: Arc<AtomicU64>,
    tx: Arc<watch::Sender<SearchResults>>,
}

impl<G> DebouncedSearch<G>
where
    G: CatalogGateway + Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(gateway: G, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(SearchResults::default());
        Self {
            gateway,
            delay,
            limit: DEFAULT_RESULT_LIMIT,
            latest: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Subscribe to published results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.tx.subscribe()
    }

    /// Submit the current query text.
    ///
    /// Supersedes any pending or in-flight submission. Blank queries publish
    /// an empty result immediately without touching the network.
    pub fn submit(&self, query: &str) {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim().to_string();

        if query.is_empty() {
            self.tx.send_replace(SearchResults {
                seq,
                query,
                products: Vec::new(),
            });
            return;
        }

        let gateway = self.gateway.clone();
        let latest = Arc::clone(&self.latest);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        let limit = self.limit;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Superseded while debouncing: the timer was logically
            // cancelled, issue no request.
            if latest.load(Ordering::SeqCst) != seq {
                return;
            }

            let products = match gateway.search_products(&query, limit).await {
                Ok(products) => products,
                Err(e) => {
                    tracing::warn!(error = %e, query = %query, "Search failed");
                    Vec::new()
                }
            };

            // Stale response: a newer submission won the race.
            if latest.load(Ordering::SeqCst) != seq {
                tracing::debug!(seq, query = %query, "Discarding stale search response");
                return;
            }

            tx.send_replace(SearchResults {
                seq,
                query,
                products,
            });
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use crate::shopify::ShopifyError;

    fn hit(title: &str) -> Product {
        Product {
            id: format!("gid-{title}"),
            handle: title.to_string(),
            title: title.to_string(),
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

    /// Records queries; per-query artificial latency simulates slow
    /// responses for the stale-discard test.
    #[derive(Clone, Default)]
    struct StubSearch {
        calls: Arc<Mutex<Vec<String>>>,
        latency: Arc<Mutex<HashMap<String, Duration>>>,
    }

    impl StubSearch {
        fn set_latency(&self, query: &str, latency: Duration) {
            self.latency
                .lock()
                .unwrap()
                .insert(query.to_string(), latency);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CatalogGateway for StubSearch {
        async fn products_by_ids(&self, _ids: &[String]) -> Result<Vec<Product>, ShopifyError> {
            Ok(Vec::new())
        }

        async fn search_products(
            &self,
            query: &str,
            _first: u32,
        ) -> Result<Vec<Product>, ShopifyError> {
            let latency = {
                self.calls.lock().unwrap().push(query.to_string());
                self.latency.lock().unwrap().get(query).copied()
            };
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            Ok(vec![hit(query)])
        }
    }

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_issues_one_request_for_final_query() {
        let gateway = StubSearch::default();
        let search = DebouncedSearch::new(gateway.clone(), DELAY);
        let mut rx = search.subscribe();

        search.submit("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        search.submit("ab");
        tokio::time::advance(Duration::from_millis(100)).await;
        search.submit("abc");

        rx.changed().await.unwrap();

        let results = rx.borrow().clone();
        assert_eq!(results.query, "abc");
        assert_eq!(results.products.len(), 1);
        assert_eq!(gateway.calls(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiescent_submissions_each_fetch() {
        let gateway = StubSearch::default();
        let search = DebouncedSearch::new(gateway.clone(), DELAY);
        let mut rx = search.subscribe();

        search.submit("tee");
        rx.changed().await.unwrap();
        search.submit("hoodie");
        rx.changed().await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec!["tee".to_string(), "hoodie".to_string()]
        );
        assert_eq!(rx.borrow().query, "hoodie");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_clobber_newer_results() {
        let gateway = StubSearch::default();
        gateway.set_latency("slow", Duration::from_millis(1000));
        gateway.set_latency("fast", Duration::from_millis(10));

        let search = DebouncedSearch::new(gateway.clone(), DELAY);
        let mut rx = search.subscribe();

        search.submit("slow");
        // Let the slow request get past the debounce window and in flight.
        tokio::time::advance(Duration::from_millis(310)).await;
        search.submit("fast");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().query, "fast");

        // Let the slow response land; it must be discarded.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().query, "fast");

        // Both requests were issued; cancellation is response-side only.
        assert_eq!(gateway.calls(), vec!["slow".to_string(), "fast".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_publishes_empty_without_fetch() {
        let gateway = StubSearch::default();
        let search = DebouncedSearch::new(gateway.clone(), DELAY);
        let mut rx = search.subscribe();

        search.submit("tee");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().products.len(), 1);

        search.submit("   ");
        rx.changed().await.unwrap();

        assert!(rx.borrow().products.is_empty());
        assert_eq!(gateway.calls(), vec!["tee".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_supersedes_pending_fetch() {
        let gateway = StubSearch::default();
        let search = DebouncedSearch::new(gateway.clone(), DELAY);
        let mut rx = search.subscribe();

        // Type then clear the field before the debounce elapses.
        search.submit("tee");
        tokio::time::advance(Duration::from_millis(100)).await;
        search.submit("");

        rx.changed().await.unwrap();
        assert!(rx.borrow().products.is_empty());

        // The pending "tee" timer wakes superseded and never fetches.
        tokio::time::sleep(DELAY * 2).await;
        assert!(gateway.calls().is_empty());
    }
}
