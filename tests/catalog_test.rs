// Integration test for the CatalogStore against a fake catalog backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;

use docfetch_engine::catalog::store::{CatalogItem, CatalogStore};

fn sample_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            key: "https://x/doc1".to_string(),
            title: "Machine Learning".to_string(),
            year: "2020".to_string(),
            url: "t1".to_string(),
        },
        CatalogItem {
            key: "https://x/doc2".to_string(),
            title: "Deep Networks".to_string(),
            year: "2019".to_string(),
            url: "t2".to_string(),
        },
    ]
}

async fn catalog_handler(State(broken): State<Arc<AtomicBool>>) -> Response {
    if broken.load(Ordering::Relaxed) {
        (StatusCode::INTERNAL_SERVER_ERROR, "catalog backend down").into_response()
    } else {
        Json(sample_items()).into_response()
    }
}

/// Start a fake catalog server whose failure mode can be flipped at runtime.
async fn start_catalog_server(broken: Arc<AtomicBool>) -> String {
    let app = Router::new()
        .route("/catalog", get(catalog_handler))
        .with_state(broken);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}/catalog", addr)
}

#[tokio::test]
async fn load_replaces_both_views_and_resets_filter() {
    let broken = Arc::new(AtomicBool::new(false));
    let url = start_catalog_server(broken).await;
    let store = CatalogStore::new(url);

    store.load().await;
    assert_eq!(store.items(), sample_items());
    assert_eq!(store.filtered(), sample_items());

    let hits = store.apply_filter("machine");
    assert_eq!(hits.len(), 1);
    assert_eq!(store.filtered_len(), 1);

    // Reloading resets the active filter to "no query".
    store.load().await;
    assert_eq!(store.filtered_len(), 2);
}

#[tokio::test]
async fn load_failure_keeps_previous_state() {
    let broken = Arc::new(AtomicBool::new(false));
    let url = start_catalog_server(broken.clone()).await;
    let store = CatalogStore::new(url);

    store.load().await;
    assert_eq!(store.items().len(), 2);
    store.apply_filter("deep");
    assert_eq!(store.filtered_len(), 1);

    broken.store(true, Ordering::Relaxed);
    store.load().await;

    // Canonical data and the active filtered view both survive.
    assert_eq!(store.items().len(), 2);
    assert_eq!(store.filtered_len(), 1);
}

#[tokio::test]
async fn load_malformed_body_keeps_previous_state() {
    async fn garbage_handler() -> Response {
        (StatusCode::OK, "definitely not json").into_response()
    }
    let app = Router::new().route("/catalog", get(garbage_handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let store = CatalogStore::new(format!("http://{}/catalog", addr));
    store.load().await;
    assert!(store.items().is_empty());
    assert!(store.filtered().is_empty());
}

#[tokio::test]
async fn load_unreachable_host_keeps_previous_state() {
    let store = CatalogStore::new("http://127.0.0.1:1/catalog".to_string());
    store.load().await;
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn apply_filter_always_evaluates_against_canonical_data() {
    let broken = Arc::new(AtomicBool::new(false));
    let url = start_catalog_server(broken).await;
    let store = CatalogStore::new(url);
    store.load().await;

    // A query that matches nothing must not shrink the base for the next one.
    assert!(store.apply_filter("zzz").is_empty());
    assert_eq!(store.apply_filter("machine").len(), 1);
    assert_eq!(store.apply_filter("").len(), 2);
}

#[tokio::test]
async fn find_resolves_items_by_key() {
    let broken = Arc::new(AtomicBool::new(false));
    let url = start_catalog_server(broken).await;
    let store = CatalogStore::new(url);
    store.load().await;

    let found = store.find("https://x/doc2").unwrap();
    assert_eq!(found.title, "Deep Networks");
    assert!(store.find("https://x/nope").is_none());
}
