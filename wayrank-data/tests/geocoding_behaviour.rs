//! Behavioural tests for [`HttpGeocoder`] against a mock search service.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mockito::{Matcher, Mock, Server, ServerGuard};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayrank_core::{ErrorKind, Geocoder, Place, ProviderError};
use wayrank_data::{HttpGeocoder, HttpGeocoderConfig, ResponseCache, RetryPolicy};

/// Mock server, the mock registered on it and a count of requests served.
struct SearchService {
    server: ServerGuard,
    mock: Option<Mock>,
    hits: Arc<AtomicUsize>,
}

type ResultCell = RefCell<Option<Result<Vec<Place>, ProviderError>>>;

#[fixture]
fn service() -> RefCell<SearchService> {
    RefCell::new(SearchService {
        server: Server::new(),
        mock: None,
        hits: Arc::new(AtomicUsize::new(0)),
    })
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn respond_with(service: &RefCell<SearchService>, status: usize, body: &'static str) {
    let mut service = service.borrow_mut();
    let hits = Arc::clone(&service.hits);
    let mock = service
        .server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body_from_request(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            body.as_bytes().to_vec()
        })
        .create();
    service.mock = Some(mock);
}

fn geocode(service: &RefCell<SearchService>, query: &str, times: usize) -> Result<Vec<Place>, ProviderError> {
    let config = HttpGeocoderConfig::new(service.borrow().server.url())
        .with_timeout(Duration::from_secs(5))
        .with_retry(RetryPolicy::default().with_backoff_step(Duration::ZERO));
    let geocoder =
        HttpGeocoder::with_config(config, ResponseCache::default()).expect("geocoder should build");
    let mut outcome = geocoder.geocode(query, 5);
    for _ in 1..times {
        outcome = geocoder.geocode(query, 5);
    }
    outcome
}

// --- Given steps ---

#[given("a search service returning one place")]
fn service_ok(#[from(service)] service: &RefCell<SearchService>) {
    respond_with(
        service,
        200,
        r#"[{"display_name": "Tehran", "lat": "35.6892", "lon": "51.3890"}]"#,
    );
}

#[given("a search service rejecting this client")]
fn service_forbidden(#[from(service)] service: &RefCell<SearchService>) {
    respond_with(service, 403, "forbidden");
}

#[given("a search service that is busy")]
fn service_busy(#[from(service)] service: &RefCell<SearchService>) {
    respond_with(service, 503, "busy");
}

// --- When steps ---

#[when("I geocode {query} once")]
fn geocode_once(
    #[from(service)] service: &RefCell<SearchService>,
    #[from(result)] result: &ResultCell,
    query: String,
) {
    *result.borrow_mut() = Some(geocode(service, query.trim_matches('"'), 1));
}

#[when("I geocode {query} twice")]
fn geocode_twice(
    #[from(service)] service: &RefCell<SearchService>,
    #[from(result)] result: &ResultCell,
    query: String,
) {
    *result.borrow_mut() = Some(geocode(service, query.trim_matches('"'), 2));
}

// --- Then steps ---

#[then("no places are returned")]
fn then_empty(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let places = borrowed
        .as_ref()
        .expect("geocode ran")
        .as_ref()
        .expect("expected Ok result");
    assert!(places.is_empty());
}

#[then("one place is returned")]
fn then_one(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let places = borrowed
        .as_ref()
        .expect("geocode ran")
        .as_ref()
        .expect("expected Ok result");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].display_name, "Tehran");
}

#[then("a blocked error is returned")]
fn then_blocked(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let err = borrowed
        .as_ref()
        .expect("geocode ran")
        .as_ref()
        .expect_err("expected an error");
    assert_eq!(err.kind(), ErrorKind::Blocked, "got {err:?}");
}

#[then("an unavailable error is returned")]
fn then_unavailable(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let err = borrowed
        .as_ref()
        .expect("geocode ran")
        .as_ref()
        .expect_err("expected an error");
    assert_eq!(err.kind(), ErrorKind::Unavailable, "got {err:?}");
    assert!(matches!(err, ProviderError::RetriesExhausted { .. }));
}

#[then("the search service received {count} requests")]
fn then_requests(#[from(service)] service: &RefCell<SearchService>, count: usize) {
    let service = service.borrow();
    assert!(service.mock.is_some(), "mock registered");
    assert_eq!(service.hits.load(Ordering::SeqCst), count);
}

#[scenario(path = "tests/features/geocoding.feature", index = 0)]
fn blank_query_short_circuits(service: RefCell<SearchService>, result: ResultCell) {
    let _ = (service, result);
}

#[scenario(path = "tests/features/geocoding.feature", index = 1)]
fn repeated_query_is_cached(service: RefCell<SearchService>, result: ResultCell) {
    let _ = (service, result);
}

#[scenario(path = "tests/features/geocoding.feature", index = 2)]
fn forbidden_is_blocked(service: RefCell<SearchService>, result: ResultCell) {
    let _ = (service, result);
}

#[scenario(path = "tests/features/geocoding.feature", index = 3)]
fn busy_service_exhausts_retries(service: RefCell<SearchService>, result: ResultCell) {
    let _ = (service, result);
}
