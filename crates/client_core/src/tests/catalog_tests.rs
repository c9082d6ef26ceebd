use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct CatalogServerState {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn list_artworks(
    State(state): State<CatalogServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.queries.lock().await.push(query.clone());
    let page = query.get("page").cloned().unwrap_or_default();
    Json(json!({
        "pagination": {"total": 100, "limit": 2, "offset": 0, "total_pages": 50, "current_page": 1},
        "data": [
            {"title": format!("Sunday ({page})"), "place_of_origin": "France", "date_start": 1884, "date_end": 1886},
            {"title": "Starry Night", "artist_display": "Vincent van Gogh", "inscriptions": null}
        ]
    }))
}

async fn rejected() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "status": 403,
            "error": "Invalid limit",
            "detail": "You have requested too many resources per page."
        })),
    )
}

async fn unavailable() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream down")
}

async fn garbage() -> impl IntoResponse {
    "<html>not json</html>"
}

async fn bare_object() -> impl IntoResponse {
    Json(json!({"data": [{}]}))
}

async fn spawn_catalog_server() -> anyhow::Result<(String, CatalogServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = CatalogServerState::default();
    let app = Router::new()
        .route("/api/v1/artworks", get(list_artworks))
        .route("/rejected", get(rejected))
        .route("/unavailable", get(unavailable))
        .route("/garbage", get(garbage))
        .route("/bare", get(bare_object))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn fetch_sends_page_and_caller_supplied_size() {
    let (base, state) = spawn_catalog_server().await.expect("spawn server");
    let client =
        CatalogClient::new(&format!("{base}/api/v1/artworks"), None).expect("client");

    let page = client
        .fetch_page(PageRequest::new(3, 25))
        .await
        .expect("page 3");

    assert_eq!(page.total_count, 100);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].title.as_deref(), Some("Sunday (3)"));
    assert_eq!(page.records[0].date_end, Some(1886));
    assert_eq!(page.records[1].identity().as_str(), "Starry Night");
    assert_eq!(page.records[1].inscriptions, None);

    let queries = state.queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("page").map(String::as_str), Some("3"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("25"));
    assert_eq!(
        queries[0].get("fields").map(String::as_str),
        Some("title,place_of_origin,artist_display,inscriptions,date_start,date_end")
    );
}

#[tokio::test]
async fn page_zero_is_rejected_without_a_request() {
    let (base, state) = spawn_catalog_server().await.expect("spawn server");
    let client =
        CatalogClient::new(&format!("{base}/api/v1/artworks"), None).expect("client");

    let err = client
        .fetch_page(PageRequest::new(0, 12))
        .await
        .expect_err("page 0 must fail");

    assert!(matches!(err, FetchError::InvalidPage { page: 0 }));
    assert!(state.queries.lock().await.is_empty());
}

#[tokio::test]
async fn non_success_status_carries_service_detail() {
    let (base, _state) = spawn_catalog_server().await.expect("spawn server");
    let client = CatalogClient::new(&format!("{base}/rejected"), None).expect("client");

    let err = client
        .fetch_page(PageRequest::new(2, 500))
        .await
        .expect_err("403 must fail");

    match &err {
        FetchError::Status {
            page,
            status,
            detail,
        } => {
            assert_eq!(*page, 2);
            assert_eq!(*status, 403);
            assert_eq!(
                detail.as_deref(),
                Some("You have requested too many resources per page.")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.page(), 2);
    assert!(err.to_string().contains("status 403 for page 2"));
}

#[tokio::test]
async fn non_json_error_body_has_no_detail() {
    let (base, _state) = spawn_catalog_server().await.expect("spawn server");
    let client = CatalogClient::new(&format!("{base}/unavailable"), None).expect("client");

    let err = client
        .fetch_page(PageRequest::new(1, 12))
        .await
        .expect_err("503 must fail");

    assert!(matches!(
        err,
        FetchError::Status {
            page: 1,
            status: 503,
            detail: None
        }
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (base, _state) = spawn_catalog_server().await.expect("spawn server");
    let client = CatalogClient::new(&format!("{base}/garbage"), None).expect("client");

    let err = client
        .fetch_page(PageRequest::new(4, 12))
        .await
        .expect_err("html must fail");

    assert!(matches!(err, FetchError::Decode { page: 4, .. }));
}

#[tokio::test]
async fn missing_pagination_block_reports_zero_total() {
    let (base, _state) = spawn_catalog_server().await.expect("spawn server");
    let client = CatalogClient::new(&format!("{base}/bare"), None).expect("client");

    let page = client
        .fetch_page(PageRequest::new(1, 12))
        .await
        .expect("bare page");

    assert_eq!(page.total_count, 0);
    assert_eq!(page.records, vec![Record::default()]);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = CatalogClient::new(&format!("http://{addr}/api/v1/artworks"), None)
        .expect("client");

    let err = client
        .fetch_page(PageRequest::new(7, 12))
        .await
        .expect_err("closed port must fail");

    assert!(matches!(err, FetchError::Transport { page: 7, .. }));
}

#[test]
fn rejects_unparseable_catalog_url() {
    assert!(CatalogClient::new("not a url", None).is_err());
}
