//! Fetch orchestration against a scripted listing service.

mod support;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use starport_commerce::catalog::{
    Applied, CatalogStore, FetchKind, FetchStatus, ListingPage, QuantityCaps,
};
use starport_commerce::Cursor;
use starport_data::FetchError;
use starport_executor::FetchOrchestrator;
use support::{names, page, Call, ScriptedListing};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn setup() -> (Arc<ScriptedListing>, FetchOrchestrator) {
    let service = Arc::new(ScriptedListing::new());
    let catalog = Arc::new(Mutex::new(CatalogStore::with_caps(QuantityCaps::seeded(42))));
    let orchestrator = FetchOrchestrator::new(catalog, service.clone(), DEBOUNCE);
    (service, orchestrator)
}

fn catalog(orchestrator: &FetchOrchestrator) -> std::sync::MutexGuard<'_, CatalogStore> {
    orchestrator.catalog().lock().unwrap()
}

const FIRST_PAGE: [&str; 10] = [
    "CR90 corvette",
    "Star Destroyer",
    "Sentinel-class landing craft",
    "Death Star",
    "Millennium Falcon",
    "Y-wing",
    "X-wing",
    "TIE Advanced x1",
    "Executor",
    "Rebel transport",
];

#[tokio::test]
async fn test_initial_fetch() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&FIRST_PAGE, Some("https://swapi.dev/api/starships/?page=2"), 36));

    assert_eq!(orchestrator.fetch_initial().await, Applied::Applied);

    let catalog = catalog(&orchestrator);
    let primary = catalog.primary_page().unwrap();
    assert_eq!(primary.len(), 10);
    assert_eq!(
        catalog.next_cursor(),
        Some(&Cursor::new("https://swapi.dev/api/starships/?page=2"))
    );
    assert!(!catalog.primary_loading());
    assert_eq!(catalog.primary_error(), None);
    for product in &primary.items {
        let cap = catalog.quantity_cap(&product.id).unwrap();
        assert!((1..=10).contains(&cap));
    }
    assert_eq!(service.calls(), vec![Call::List]);
}

#[tokio::test]
async fn test_load_more_appends_in_order() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["A", "B"], Some("p2"), 5));
    service.push_ok(page(&["C", "A"], Some("p3"), 5));

    orchestrator.fetch_initial().await;
    let caps_before = catalog(&orchestrator).quantity_cap(&"A".into());

    assert_eq!(orchestrator.load_more(Cursor::new("p2")).await, Applied::Applied);

    let catalog = catalog(&orchestrator);
    assert_eq!(names(catalog.primary_page().unwrap()), vec!["A", "B", "C", "A"]);
    assert_eq!(catalog.next_cursor(), Some(&Cursor::new("p3")));
    assert_eq!(catalog.quantity_cap(&"A".into()), caps_before);
    assert!(catalog.quantity_cap(&"C".into()).is_some());
    assert_eq!(*catalog.status(FetchKind::More), FetchStatus::Success);
    assert_eq!(
        service.calls(),
        vec![Call::List, Call::ListFrom("p2".to_string())]
    );
}

#[tokio::test]
async fn test_load_more_if_available() {
    let (service, orchestrator) = setup();

    // Nothing loaded yet.
    assert_eq!(orchestrator.load_more_if_available().await, None);

    service.push_ok(page(&["A"], Some("p2"), 3));
    orchestrator.fetch_initial().await;

    let release = service.push_gated(Ok(page(&["B"], None, 3)));
    let background = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.load_more_if_available().await })
    };
    service.wait_for_calls(2).await;
    assert!(catalog(&orchestrator).more_loading());

    // A second load-more is refused while the first is in flight.
    assert_eq!(orchestrator.load_more_if_available().await, None);

    release.send(()).unwrap();
    assert_eq!(background.await.unwrap(), Some(Applied::Applied));

    // Last page: no cursor left.
    assert_eq!(orchestrator.load_more_if_available().await, None);
    assert_eq!(service.calls().len(), 2);
    assert_eq!(names(catalog(&orchestrator).primary_page().unwrap()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_failure_keeps_stale_data() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["A", "B"], Some("p2"), 4));
    service.push_err(FetchError::Http {
        status: 503,
        url: "https://swapi.dev/api/starships/".into(),
    });

    orchestrator.fetch_initial().await;
    assert_eq!(orchestrator.fetch_initial().await, Applied::Applied);

    let catalog = catalog(&orchestrator);
    assert_eq!(catalog.primary_error(), Some("Failed to fetch starships"));
    assert_eq!(names(catalog.primary_page().unwrap()), vec!["A", "B"]);
    assert!(!catalog.primary_loading());
}

#[tokio::test]
async fn test_load_more_failure_reports_on_primary() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["A"], Some("p2"), 2));
    service.push_err(FetchError::Timeout("10s".into()));
    service.push_ok(page(&["B"], None, 2));

    orchestrator.fetch_initial().await;
    orchestrator.load_more(Cursor::new("p2")).await;
    assert_eq!(
        catalog(&orchestrator).primary_error(),
        Some("Failed to load more starships")
    );

    // Retrying clears the error.
    orchestrator.load_more(Cursor::new("p2")).await;
    let catalog = catalog(&orchestrator);
    assert_eq!(catalog.primary_error(), None);
    assert_eq!(names(catalog.primary_page().unwrap()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_latest() {
    let (service, orchestrator) = setup();
    let first = service.push_gated(Ok(page(&["old"], None, 1)));
    let second = service.push_gated(Ok(page(&["new"], None, 1)));

    let a = orchestrator.spawn_fetch_initial();
    service.wait_for_calls(1).await;
    let b = orchestrator.spawn_fetch_initial();
    service.wait_for_calls(2).await;

    second.send(()).unwrap();
    assert_eq!(b.await.unwrap(), Applied::Applied);
    first.send(()).unwrap();
    assert_eq!(a.await.unwrap(), Applied::Stale);

    let catalog = catalog(&orchestrator);
    assert_eq!(names(catalog.primary_page().unwrap()), vec!["new"]);
    assert!(catalog.quantity_cap(&"old".into()).is_none());
    assert!(!catalog.primary_loading());
}

#[tokio::test]
async fn test_stale_failure_is_discarded() {
    let (service, orchestrator) = setup();
    let first = service.push_gated(Err(FetchError::Connection("reset".into())));
    service.push_ok(page(&["A"], None, 1));

    let a = orchestrator.spawn_fetch_initial();
    service.wait_for_calls(1).await;
    assert_eq!(orchestrator.fetch_initial().await, Applied::Applied);

    first.send(()).unwrap();
    assert_eq!(a.await.unwrap(), Applied::Stale);
    assert_eq!(catalog(&orchestrator).primary_error(), None);
}

#[tokio::test]
async fn test_search_with_no_results() {
    let (service, orchestrator) = setup();
    service.push_ok(ListingPage::new(Vec::new(), None, 0));

    assert_eq!(orchestrator.search_now("zz-nonexistent").await, Applied::Applied);

    let catalog = catalog(&orchestrator);
    let results = catalog.search_page().unwrap();
    assert!(results.is_empty());
    assert!(!results.has_more());
    assert_eq!(catalog.search_error(), None);
    assert!(!catalog.search_loading());
}

#[tokio::test]
async fn test_search_failure() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["X-wing"], None, 1));
    service.push_err(FetchError::Deserialization("expected value".into()));

    orchestrator.search_now("x").await;
    orchestrator.search_now("x-w").await;

    let catalog = catalog(&orchestrator);
    assert_eq!(catalog.search_error(), Some("Failed to search starships"));
    assert_eq!(names(catalog.search_page().unwrap()), vec!["X-wing"]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_sends_latest_query_only() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["X-wing"], None, 1));

    orchestrator.search("x");
    tokio::time::sleep(Duration::from_millis(100)).await;
    orchestrator.search("x-");
    tokio::time::sleep(Duration::from_millis(100)).await;
    orchestrator.search("  x-wing ");
    tokio::time::sleep(Duration::from_millis(499)).await;
    assert!(service.calls().is_empty());

    orchestrator.settle_search().await;
    assert_eq!(service.calls(), vec![Call::Search("x-wing".to_string())]);
    assert_eq!(
        names(catalog(&orchestrator).search_page().unwrap()),
        vec!["X-wing"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_clears_immediately() {
    let (service, orchestrator) = setup();
    service.push_ok(page(&["X-wing"], None, 1));
    orchestrator.search_now("x").await;
    assert!(catalog(&orchestrator).search_page().is_some());

    orchestrator.search("y-wing");
    assert!(orchestrator.search_pending());
    orchestrator.search("   ");

    {
        let catalog = catalog(&orchestrator);
        assert!(catalog.search_page().is_none());
        assert_eq!(catalog.search_error(), None);
        assert!(!catalog.search_loading());
    }
    assert!(!orchestrator.search_pending());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(service.calls(), vec![Call::Search("x".to_string())]);
}

#[tokio::test]
async fn test_clear_discards_in_flight_search() {
    let (service, orchestrator) = setup();
    let release = service.push_gated(Ok(page(&["X-wing"], None, 1)));

    let pending = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.search_now("x").await })
    };
    service.wait_for_calls(1).await;
    assert!(catalog(&orchestrator).search_loading());

    orchestrator.search("");
    release.send(()).unwrap();

    assert_eq!(pending.await.unwrap(), Applied::Stale);
    assert!(catalog(&orchestrator).search_page().is_none());
}

#[tokio::test]
async fn test_fetches_overlap_across_kinds() {
    let (service, orchestrator) = setup();
    let primary = service.push_gated(Ok(page(&["A"], None, 1)));
    service.push_ok(page(&["X-wing"], None, 1));

    let listing = orchestrator.spawn_fetch_initial();
    service.wait_for_calls(1).await;

    assert_eq!(orchestrator.search_now("x").await, Applied::Applied);
    assert!(catalog(&orchestrator).primary_loading());

    primary.send(()).unwrap();
    assert_eq!(listing.await.unwrap(), Applied::Applied);

    let catalog = catalog(&orchestrator);
    assert_eq!(names(catalog.primary_page().unwrap()), vec!["A"]);
    assert_eq!(names(catalog.search_page().unwrap()), vec!["X-wing"]);
}
