//! Versioned routing through a real axum router.

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use serde_json::json;

use api_versioning::config::schema::Manifest;
use api_versioning::http::echo_router;
use api_versioning::http::ServeError;
use api_versioning::lifecycle::HostError;
use api_versioning::{register, RouteRegistry, RouteVersioning, VersionedRouter, VersioningOptions};

mod common;

async fn list_users() -> &'static str {
    "users"
}

async fn health() -> &'static str {
    "healthy"
}

async fn get_widget(Path(id): Path<u32>) -> String {
    format!("widget {id}")
}

#[tokio::test]
async fn test_original_and_alias_paths_share_handler() {
    let mut router: VersionedRouter = VersionedRouter::new();
    register(&mut router, &VersioningOptions::new("api", "v1")).unwrap();

    router.route(Method::GET, "/users", list_users).unwrap();
    router
        .route_with(Method::GET, "/health", health, RouteVersioning::Disabled)
        .unwrap();
    router
        .route_with(
            Method::GET,
            "/widgets/{id}",
            get_widget,
            RouteVersioning::version("v2"),
        )
        .unwrap();

    let app = router.into_router().unwrap();

    assert_eq!(common::send(&app, Method::GET, "/api/v1/users").await, (StatusCode::OK, "users".into()));
    assert_eq!(common::send(&app, Method::GET, "/users").await.0, StatusCode::NOT_FOUND);
    assert_eq!(common::send(&app, Method::GET, "/api/v2/users").await.0, StatusCode::NOT_FOUND);

    assert_eq!(common::send(&app, Method::GET, "/api/v1/health").await.1, "healthy");
    assert_eq!(common::send(&app, Method::GET, "/health").await.1, "healthy");

    assert_eq!(common::send(&app, Method::GET, "/api/v1/widgets/7").await.1, "widget 7");
    assert_eq!(common::send(&app, Method::GET, "/api/v2/widgets/7").await.1, "widget 7");
}

#[tokio::test]
async fn test_alias_keeps_method() {
    let mut router: VersionedRouter = VersionedRouter::new();
    register(&mut router, &VersioningOptions::default()).unwrap();

    router
        .route_with(Method::POST, "/hooks", health, RouteVersioning::Disabled)
        .unwrap();
    let app = router.into_router().unwrap();

    assert_eq!(common::send(&app, Method::POST, "/hooks").await.0, StatusCode::OK);
    assert_eq!(
        common::send(&app, Method::GET, "/hooks").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn test_state_is_shared_by_aliases() {
    async fn greet(State(name): State<String>) -> String {
        format!("hello {name}")
    }

    let mut router: VersionedRouter<String> = VersionedRouter::new();
    register(&mut router, &VersioningOptions::new("svc", "")).unwrap();
    router
        .route_with(Method::GET, "/greet", greet, RouteVersioning::Disabled)
        .unwrap();

    let app = router.into_router().unwrap().with_state("world".to_string());

    assert_eq!(common::send(&app, Method::GET, "/svc/greet").await.1, "hello world");
    assert_eq!(common::send(&app, Method::GET, "/greet").await.1, "hello world");
}

#[tokio::test]
async fn test_echo_router_reports_canonical_route() {
    let manifest: Manifest = toml::from_str(
        r#"
        [versioning]
        prefix = "api"
        version = "v1"

        [[routes]]
        method = "GET"
        path = "/widgets"
        versioning = { version = "v2" }
        "#,
    )
    .unwrap();

    let (app, registration) = echo_router(&manifest).unwrap();
    assert_eq!(registration.global_prefix(), Some("/api/v1"));

    let (status, body) = common::send_json(&app, Method::GET, "/api/v2/widgets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "method": "GET", "route": "/api/v1/widgets", "path": "/api/v2/widgets" })
    );
}

#[tokio::test]
async fn test_disabled_options_leave_paths_alone() {
    let mut router: VersionedRouter = VersionedRouter::new();
    register(&mut router, &VersioningOptions::disabled()).unwrap();
    router
        .route_with(Method::GET, "/users", list_users, RouteVersioning::version("v9"))
        .unwrap();
    let app = router.into_router().unwrap();

    assert_eq!(common::send(&app, Method::GET, "/users").await.1, "users");
    assert_eq!(common::send(&app, Method::GET, "/api/v9/users").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_alias_clashing_with_capture_route_is_skipped() {
    let mut router: VersionedRouter = VersionedRouter::new();
    register(&mut router, &VersioningOptions::new("api", "v1")).unwrap();
    router
        .route_with(Method::GET, "/{id}", get_widget, RouteVersioning::Disabled)
        .unwrap();
    router.set_route_prefix(String::new());
    router.route(Method::POST, "/{name}", list_users).unwrap();

    let app = router.into_router().unwrap();

    assert_eq!(common::send(&app, Method::GET, "/api/v1/7").await.1, "widget 7");
    assert_eq!(common::send(&app, Method::POST, "/7").await.1, "users");
    assert_eq!(common::send(&app, Method::GET, "/7").await.0, StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_echo_router_rejects_colon_captures() {
    let manifest: Manifest = toml::from_str(
        r#"
        [[routes]]
        method = "GET"
        path = "/users/:id"
        "#,
    )
    .unwrap();

    let err = echo_router(&manifest).unwrap_err();
    assert!(matches!(err, ServeError::Host(HostError::InvalidPath { .. })));
}
