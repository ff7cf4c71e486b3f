//! Shared helpers for integration tests.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use api_versioning::routing::route::method_path;
use api_versioning::RouteTable;

/// Send one request through `router`, returning status and body text.
#[allow(dead_code)]
pub async fn send(router: &Router, method: Method, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Like [`send`], parsing the body as JSON.
#[allow(dead_code)]
pub async fn send_json(router: &Router, method: Method, path: &str) -> (StatusCode, Value) {
    let (status, body) = send(router, method, path).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// `METHOD /path` for every route in the table, in order.
#[allow(dead_code)]
pub fn route_lines<H: Clone>(table: &RouteTable<H>) -> Vec<String> {
    table
        .iter()
        .map(|r| method_path(&r.method, &r.path))
        .collect()
}
