//! Debounced search scenarios.

use std::time::Duration;

use bold_type_integration_tests::{MockCatalog, sample_product};
use bold_type_storefront::state::DebouncedSearch;

const DELAY: Duration = Duration::from_millis(300);

fn catalog() -> MockCatalog {
    MockCatalog::with_products(vec![
        sample_product("gid-1", "I'm Not Arguing", 48),
        sample_product("gid-2", "Strong Opinions", 52),
        sample_product("gid-3", "Per My Last Email", 48),
    ])
}

#[tokio::test(start_paused = true)]
async fn typing_a_word_issues_one_request() {
    let catalog = catalog();
    let search = DebouncedSearch::new(catalog.clone(), DELAY);
    let mut results = search.subscribe();

    // "a", "ar", "arguing" within the debounce window.
    search.submit("a");
    tokio::time::advance(Duration::from_millis(80)).await;
    search.submit("ar");
    tokio::time::advance(Duration::from_millis(80)).await;
    search.submit("arguing");

    results.changed().await.expect("results published");

    let published = results.borrow().clone();
    assert_eq!(published.query, "arguing");
    assert_eq!(published.products.len(), 1);
    assert_eq!(
        published.products.first().expect("hit").title,
        "I'm Not Arguing"
    );
    assert_eq!(catalog.searches(), vec!["arguing".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_clobbers_newer_results() {
    let catalog = catalog();
    catalog.set_search_latency("opinions", Duration::from_secs(2));

    let search = DebouncedSearch::new(catalog.clone(), DELAY);
    let mut results = search.subscribe();

    search.submit("opinions");
    // Debounce elapses and the slow request goes out.
    tokio::time::advance(DELAY + Duration::from_millis(10)).await;
    search.submit("email");

    results.changed().await.expect("results published");
    assert_eq!(results.borrow().query, "email");

    // The slow "opinions" response lands afterwards and is discarded.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!results.has_changed().expect("channel alive"));
    assert_eq!(results.borrow().query, "email");
    assert_eq!(
        catalog.searches(),
        vec!["opinions".to_string(), "email".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn search_outage_publishes_empty_results() {
    let catalog = catalog();
    catalog.set_offline(true);

    let search = DebouncedSearch::new(catalog.clone(), DELAY);
    let mut results = search.subscribe();

    search.submit("arguing");
    results.changed().await.expect("results published");

    // Degrade to an empty result set, not a crash or a stuck spinner.
    assert_eq!(results.borrow().query, "arguing");
    assert!(results.borrow().products.is_empty());
}
