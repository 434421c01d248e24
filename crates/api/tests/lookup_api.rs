//! HTTP-level tests for `/api/lookups/{kind}`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn every_catalog_is_served(pool: PgPool) {
    for kind in [
        "species",
        "breeds",
        "health-statuses",
        "sighting-statuses",
        "request-statuses",
        "sexes",
        "cities",
        "roles",
    ] {
        let response = get(build_test_app(pool.clone()), &format!("/api/lookups/{kind}")).await;
        assert_eq!(response.status(), StatusCode::OK, "{kind}");
        let json = body_json(response).await;
        assert!(!json["data"].as_array().unwrap().is_empty(), "{kind}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn breeds_filter_by_species(pool: PgPool) {
    let json = body_json(get(build_test_app(pool), "/api/lookups/breeds?species_id=2").await).await;
    let breeds = json["data"].as_array().unwrap();

    assert_eq!(breeds.len(), 3);
    assert!(breeds.iter().all(|b| b["species_id"] == 2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_catalog_is_rejected(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/lookups/planets").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "kind");
    assert_eq!(json["errors"][0]["rule"], "one_of");
}
