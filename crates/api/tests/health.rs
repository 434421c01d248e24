//! `/health`, request ids, CORS and the catch-all route.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_reachable_database(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["database"]["reachable"], true);
    assert!(json["database"]["connections"].as_u64().unwrap() >= 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_is_not_under_api_prefix(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/health").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_gets_error_envelope(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/kennels").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn every_response_carries_a_uuid_request_id(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/lookups/species").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(request_id.len(), 36);
    assert_eq!(request_id.matches('-').count(), 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_supplied_request_id_is_echoed(pool: PgPool) {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "mobile-7f3a")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "mobile-7f3a");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cors_preflight_allows_mobile_dev_origin(pool: PgPool) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/sightings")
        .header("origin", "http://localhost:8081")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:8081"
    );
}
