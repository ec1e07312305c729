mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;
use digsignfeed::FeedExt;
use digsignserver::Server;
use std::sync::Arc;
use tower::ServiceExt;

async fn server_with(store: MemoryStore) -> Server {
    let f = fixture(store, FakeResizer::default());
    let mut server = Server::new("Test", "http://localhost:8080", 8080);
    server.init_feed(Arc::new(f.assembler)).await;
    server
}

async fn get(server: &Server, uri: &str) -> axum::response::Response {
    server
        .router()
        .await
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_feed_endpoint() {
    let server = server_with(news_store(vec![
        image_item("hours"),
        html_item("welcome", "<p>Hi</p>"),
    ]))
    .await;

    let response = get(&server, "/api/slides").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CACHE_CONTROL]
            .to_str()
            .unwrap()
            .contains("no-store")
    );

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["slides"].as_array().unwrap().len(), 2);
    assert_eq!(json["slides"][0]["type"], "image");
    assert_eq!(json["slides"][0]["post_title"], "Title hours");
    assert_eq!(json["slides"][1]["type"], "html");
    assert_eq!(json["slides"][1]["title"], "Title welcome");
    assert_eq!(json["settings"]["refresh_interval"], 10);
    assert_eq!(json["settings"]["slide_delay"], 5);
    assert_eq!(json["settings"]["enable_qrcodes"], true);
    assert_eq!(json["settings"]["layout_type"], "fullscreen");
}

#[tokio::test]
async fn test_feed_endpoint_store_failure() {
    let server = server_with(MemoryStore {
        fail: true,
        ..Default::default()
    })
    .await;

    let response = get(&server, "/api/slides").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("store offline"));
}

#[tokio::test]
async fn test_gallery_page_and_assets() {
    let server = server_with(MemoryStore::default()).await;

    let response = get(&server, "/digital-signage").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"id="digsign-carousel""#));
    assert!(page.contains(r#""feedUrl":"/api/slides""#));
    assert!(page.contains("/digsign-assets/digsign.js"));

    let response = get(&server, "/digsign-assets/digsign.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("digsignConfig"));

    let response = get(&server, "/digsign-assets/digsign.css").await;
    assert_eq!(response.status(), StatusCode::OK);
}
