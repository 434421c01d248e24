#![allow(dead_code)]

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use dogland_api::config::{LogFormat, ServerConfig};
use dogland_api::router::build_app_router;
use dogland_api::state::AppState;

/// Config for in-process tests. The database URL is unused: `sqlx::test`
/// hands each test its own pool.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
        log_format: LogFormat::Pretty,
    }
}

/// The production router on a per-test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

/// Whether `password` verifies against a stored Argon2 PHC string.
pub fn password_matches(password: &str, hash: &str) -> bool {
    let parsed = PasswordHash::new(hash).unwrap();
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// POST and return the `data` member of a 201 response.
pub async fn create(pool: &PgPool, uri: &str, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

pub async fn create_organization(pool: &PgPool, name: &str) -> i64 {
    let org = create(
        pool,
        "/api/organizations",
        serde_json::json!({"name": name, "city_id": 1}),
    )
    .await;
    org["id"].as_i64().unwrap()
}

pub async fn create_animal(pool: &PgPool, organization_id: i64, name: &str) -> i64 {
    let animal = create(
        pool,
        "/api/animals",
        serde_json::json!({
            "name": name,
            "species_id": 1,
            "health_status_id": 1,
            "organization_id": organization_id,
        }),
    )
    .await;
    animal["id"].as_i64().unwrap()
}
