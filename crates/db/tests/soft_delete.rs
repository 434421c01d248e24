//! Integration tests for animal soft-delete and hard-delete behaviour.
//!
//! Verifies that:
//! - Soft-deleted animals are hidden from `find_by_id`, list and update
//! - Soft-delete is idempotent (second call returns `false`)
//! - Hard-delete removes a soft-deleted row and cascades to its history
//! - Dependent resources of a soft-deleted animal become unreachable

use chrono::NaiveDate;
use dogland_core::pagination::PageRequest;
use dogland_db::models::adoption_request::CreateAdoptionRequest;
use dogland_db::models::animal::{AnimalFilter, CreateAnimal, UpdateAnimal};
use dogland_db::models::medical_history::CreateMedicalHistoryEntry;
use dogland_db::models::organization::CreateOrganization;
use dogland_db::repositories::{AdoptionRequestRepo, AnimalRepo, MedicalHistoryRepo, OrganizationRepo};
use sqlx::PgPool;

async fn seed_animal(pool: &PgPool, name: &str) -> i64 {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: format!("Org for {name}"),
            phone: None,
            email: None,
            address: None,
            city_id: 1,
        },
    )
    .await
    .unwrap();

    AnimalRepo::create(
        pool,
        &CreateAnimal {
            name: name.to_string(),
            age_years: None,
            age_is_estimated: Some(false),
            species_id: 1,
            breed_id: Some(1),
            health_status_id: 1,
            adoption_description: Some("Friendly".to_string()),
            photo_url: None,
            organization_id: org.id,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_deleted_animal_is_hidden(pool: PgPool) {
    let id = seed_animal(&pool, "Hidden").await;

    assert!(AnimalRepo::soft_delete(&pool, id).await.unwrap());

    assert!(AnimalRepo::find_by_id(&pool, id).await.unwrap().is_none());

    let page = AnimalRepo::list(&pool, &AnimalFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);

    let updated = AnimalRepo::update(
        &pool,
        id,
        &UpdateAnimal {
            name: Some("Back".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_delete_is_idempotent(pool: PgPool) {
    let id = seed_animal(&pool, "Twice").await;

    assert!(AnimalRepo::soft_delete(&pool, id).await.unwrap());
    assert!(!AnimalRepo::soft_delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hard_delete_removes_soft_deleted_row(pool: PgPool) {
    let id = seed_animal(&pool, "Gone").await;
    AnimalRepo::soft_delete(&pool, id).await.unwrap();

    assert!(AnimalRepo::hard_delete(&pool, id).await.unwrap());
    assert!(!AnimalRepo::hard_delete(&pool, id).await.unwrap());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM animals WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hard_delete_cascades_to_history(pool: PgPool) {
    let id = seed_animal(&pool, "Cascade").await;
    MedicalHistoryRepo::create(
        &pool,
        id,
        &CreateMedicalHistoryEntry {
            event_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            event_type: "checkup".to_string(),
            diagnosis: None,
            details: None,
            veterinarian: Some("Dr. Ruiz".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    AnimalRepo::hard_delete(&pool, id).await.unwrap();

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM medical_history WHERE animal_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_deleted_animal_rejects_dependents(pool: PgPool) {
    let id = seed_animal(&pool, "Retired").await;
    AnimalRepo::soft_delete(&pool, id).await.unwrap();

    let history = MedicalHistoryRepo::create(
        &pool,
        id,
        &CreateMedicalHistoryEntry {
            event_date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
            event_type: "surgery".to_string(),
            diagnosis: None,
            details: None,
            veterinarian: None,
        },
    )
    .await
    .unwrap();
    assert!(history.is_none());

    let request = AdoptionRequestRepo::create(
        &pool,
        &CreateAdoptionRequest {
            animal_id: id,
            user_id: None,
            message: None,
        },
    )
    .await
    .unwrap();
    assert!(request.is_none());

    assert!(MedicalHistoryRepo::list_by_animal(&pool, id, PageRequest::default())
        .await
        .unwrap()
        .is_none());
}
