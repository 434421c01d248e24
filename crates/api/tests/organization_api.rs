//! HTTP-level tests for `/api/organizations`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_animal, create_organization, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_organization(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/organizations",
        json!({
            "name": "Refugio Madrid",
            "email": "Info@Refugio.org",
            "phone": "+34 600 123 456",
            "city_id": 1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "info@refugio.org");

    let id = json["data"]["id"].as_i64().unwrap();
    let json = body_json(get(build_test_app(pool), &format!("/api/organizations/{id}")).await).await;
    assert_eq!(json["data"]["name"], "Refugio Madrid");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_phone_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/organizations",
        json!({"name": "Bad Phone", "phone": "call me", "city_id": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "phone");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_city(pool: PgPool) {
    create_organization(&pool, "Madrid One").await;
    post_json(
        build_test_app(pool.clone()),
        "/api/organizations",
        json!({"name": "Barcelona One", "city_id": 2}),
    )
    .await;

    let json = body_json(get(build_test_app(pool), "/api/organizations?city_id=2").await).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["name"], "Barcelona One");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_with_animals_returns_409(pool: PgPool) {
    let org_id = create_organization(&pool, "Busy Shelter").await;
    create_animal(&pool, org_id, "Resident").await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/organizations/{org_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let empty_id = create_organization(&pool, "Empty Shelter").await;
    let response = delete(build_test_app(pool), &format!("/api/organizations/{empty_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
