use std::{collections::HashMap, sync::Arc};

use axum::{extract::Query, routing::get, Json, Router};
use client_core::{
    CatalogClient, LoadPhase, PageSession, PageViewController, PaginationState,
    SelectionRegistry, ViewEvent,
};
use serde_json::{json, Value};
use shared::domain::Identity;
use tokio::net::TcpListener;

async fn artworks(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let titles: &[&str] = match query.get("page").map(String::as_str) {
        Some("1") => &["Sunday", "Starry Night"],
        Some("2") => &["Guernica"],
        _ => &[],
    };
    let data: Vec<Value> = titles
        .iter()
        .map(|title| json!({"title": title, "place_of_origin": "Somewhere"}))
        .collect();
    Json(json!({"pagination": {"total": 100}, "data": data}))
}

async fn spawn_catalog() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/api/v1/artworks", get(artworks));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api/v1/artworks")
}

fn visible(session: &PageSession) -> Vec<(String, bool)> {
    session
        .view()
        .rows
        .into_iter()
        .map(|row| (row.record.identity().to_string(), row.selected))
        .collect()
}

#[tokio::test]
async fn selection_spans_pages_against_live_http_catalog() {
    let url = spawn_catalog().await;
    let client = CatalogClient::new(&url, None).expect("client");
    let mut session = PageSession::new(
        Arc::new(client),
        PageViewController::new(PaginationState::default(), SelectionRegistry::new()),
    );

    session.open();
    assert_eq!(session.settle().await, LoadPhase::Loaded);
    assert_eq!(session.view().pagination.total_count, 100);

    let sunday = session.controller().records()[0].clone();
    session
        .handle_event(ViewEvent::RowSelected(sunday))
        .expect("select Sunday");

    session
        .handle_event(ViewEvent::PageRequested(2))
        .expect("go to page 2");
    assert_eq!(session.settle().await, LoadPhase::Loaded);
    assert_eq!(visible(&session), vec![("Guernica".to_string(), false)]);

    let guernica = session.controller().records()[0].clone();
    session
        .handle_event(ViewEvent::RowSelected(guernica))
        .expect("select Guernica");

    session
        .handle_event(ViewEvent::PageRequested(1))
        .expect("back to page 1");
    assert_eq!(session.settle().await, LoadPhase::Loaded);

    assert_eq!(
        visible(&session),
        vec![
            ("Sunday".to_string(), true),
            ("Starry Night".to_string(), false)
        ]
    );
    assert_eq!(
        session.controller().selection().identities(),
        vec![Identity::from("Guernica"), Identity::from("Sunday")]
    );
}

#[tokio::test]
async fn page_size_change_refetches_first_page_and_keeps_selection() {
    let url = spawn_catalog().await;
    let client = CatalogClient::new(&url, None).expect("client");
    let mut session = PageSession::new(Arc::new(client), PageViewController::default());

    session.open();
    session.settle().await;
    let first_page = session.controller().records().to_vec();
    session
        .handle_event(ViewEvent::BulkSelectionChanged(first_page))
        .expect("select all visible");
    session
        .handle_event(ViewEvent::PageRequested(2))
        .expect("go to page 2");
    session.settle().await;

    session
        .handle_event(ViewEvent::PageSizeDraftChanged("20".into()))
        .expect("edit draft");
    assert_eq!(session.view().pagination.page, 2);
    session
        .handle_event(ViewEvent::PageSizeConfirmRequested)
        .expect("apply size");
    assert_eq!(session.settle().await, LoadPhase::Loaded);

    let view = session.view();
    assert_eq!(view.pagination.page, 1);
    assert_eq!(view.pagination.page_size, 20);
    assert_eq!(view.pagination.page_count, 5);
    assert!(view.rows.iter().all(|row| row.selected));
}
