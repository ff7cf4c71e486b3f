//! End-to-end registration scenarios against the in-memory host.

use axum::http::Method;

use api_versioning::lifecycle::startup::plan;
use api_versioning::{
    register, Registration, RouteOverride, RouteRegistry, RouteTable, RouteVersioning,
    VersioningOptions,
};

mod common;

fn api_v1(table: &mut RouteTable<&'static str>) -> Registration {
    register(table, &VersioningOptions::new("api", "v1")).unwrap()
}

#[test]
fn test_plain_route_gets_global_prefix_and_no_alias() {
    let mut table = RouteTable::new();
    let registration = api_v1(&mut table);
    assert_eq!(registration.global_prefix(), Some("/api/v1"));

    table.route(Method::GET, "/users", "users").unwrap();
    table.start().unwrap();

    assert_eq!(common::route_lines(&table), ["GET /api/v1/users"]);
}

#[test]
fn test_disabled_route_gets_unprefixed_alias() {
    let mut table = RouteTable::new();
    api_v1(&mut table);

    table
        .route_with(
            Method::GET,
            "/users",
            "users",
            RouteOverride::default().enabled(false).into(),
        )
        .unwrap();
    assert_eq!(table.iter().next().unwrap().path, "/api/v1/users");

    table.start().unwrap();

    assert_eq!(common::route_lines(&table), ["GET /api/v1/users", "GET /users"]);
    let alias = table.iter().nth(1).unwrap();
    assert_eq!(alias.handler, "users");
    assert_eq!(alias.alias_of.as_deref(), Some("/api/v1/users"));
}

#[test]
fn test_version_override_gets_versioned_alias() {
    let mut table = RouteTable::new();
    api_v1(&mut table);

    table
        .route_with(Method::GET, "/widgets", "widgets", RouteVersioning::version("v2"))
        .unwrap();
    table.start().unwrap();

    assert_eq!(
        common::route_lines(&table),
        ["GET /api/v1/widgets", "GET /api/v2/widgets"]
    );
}

#[test]
fn test_top_level_disabled_changes_nothing() {
    let mut table = RouteTable::new();
    let registration = register(&mut table, &VersioningOptions::disabled()).unwrap();
    assert_eq!(registration, Registration::Disabled);
    assert_eq!(table.route_prefix(), "");

    table
        .route_with(Method::GET, "/widgets", "widgets", RouteVersioning::version("v2"))
        .unwrap();
    table.start().unwrap();

    assert_eq!(common::route_lines(&table), ["GET /widgets"]);
}

#[test]
fn test_explicit_empty_prefix_is_honoured() {
    let mut table = RouteTable::new();
    api_v1(&mut table);

    table
        .route_with(Method::GET, "/things", "things", RouteVersioning::prefix(""))
        .unwrap();
    table.start().unwrap();

    assert_eq!(
        common::route_lines(&table),
        ["GET /api/v1/things", "GET /v1/things"]
    );
}

#[test]
fn test_redundant_override_adds_nothing() {
    let mut table = RouteTable::new();
    api_v1(&mut table);

    table
        .route_with(
            Method::GET,
            "/same",
            "same",
            RouteOverride::default().prefix("api").version("v1").into(),
        )
        .unwrap();
    table.start().unwrap();

    assert_eq!(table.len(), 1);
}

#[test]
fn test_root_route_alias() {
    let mut table = RouteTable::new();
    api_v1(&mut table);

    table
        .route_with(Method::GET, "/", "root", RouteVersioning::Disabled)
        .unwrap();
    table
        .route_with(Method::GET, "/status", "status", RouteVersioning::version(""))
        .unwrap();
    table.start().unwrap();

    assert_eq!(
        common::route_lines(&table),
        ["GET /api/v1", "GET /api/v1/status", "GET /", "GET /api/status"]
    );
}

#[test]
fn test_one_alias_per_route_per_pass() {
    let mut table = RouteTable::new();
    api_v1(&mut table);
    table
        .route_with(Method::GET, "/once", "once", RouteVersioning::Disabled)
        .unwrap();

    table.start().unwrap();
    assert!(table.start().is_err());
    assert_eq!(table.len(), 2);
}

#[test]
fn test_inherited_prefix_kept_when_segments_empty() {
    let mut table = RouteTable::with_prefix("/tenant");
    let registration = register(&mut table, &VersioningOptions::new("", "")).unwrap();
    assert_eq!(registration.global_prefix(), Some("/tenant"));

    table
        .route_with(Method::GET, "/x", "x", RouteVersioning::Disabled)
        .unwrap();
    table.start().unwrap();

    assert_eq!(common::route_lines(&table), ["GET /tenant/x", "GET /x"]);
}

#[test]
fn test_plan_from_manifest() {
    let manifest = toml::from_str(
        r#"
        [versioning]
        prefix = "api"
        version = "v1"

        [[routes]]
        method = "GET"
        path = "/users"

        [[routes]]
        method = "GET"
        path = "/health"
        versioning = false

        [[routes]]
        method = "PUT"
        path = "/widgets/{id}"
        versioning = { version = "v2" }
        "#,
    )
    .unwrap();

    let (_, table) = plan(&manifest).unwrap();
    assert_eq!(
        common::route_lines(&table),
        [
            "GET /api/v1/users",
            "GET /api/v1/health",
            "PUT /api/v1/widgets/{id}",
            "GET /health",
            "PUT /api/v2/widgets/{id}",
        ]
    );
}
