//! Integration tests for repository CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create and read back each resource
//! - Partial updates through COALESCE
//! - Unique and foreign key violations
//! - Paged lists with totals and equality filters
//! - Adoption request finalization

use assert_matches::assert_matches;
use chrono::NaiveDate;
use dogland_core::pagination::PageRequest;
use dogland_db::models::adoption_request::{
    AdoptionRequestFilter, CreateAdoptionRequest, UpdateAdoptionRequest,
};
use dogland_db::models::animal::{AnimalFilter, CreateAnimal, UpdateAnimal};
use dogland_db::models::lookup::LookupKind;
use dogland_db::models::medical_history::{CreateMedicalHistoryEntry, UpdateMedicalHistoryEntry};
use dogland_db::models::organization::{CreateOrganization, OrganizationFilter};
use dogland_db::models::status::{RequestStatus, Role, Species};
use dogland_db::models::user::{CreateUser, UpdateUser, UserFilter};
use dogland_db::repositories::{
    AdoptionRequestRepo, AnimalRepo, LookupRepo, MedicalHistoryRepo, OrganizationRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_organization(name: &str) -> CreateOrganization {
    CreateOrganization {
        name: name.to_string(),
        phone: None,
        email: Some("Contact@Shelter.org".to_string()),
        address: None,
        city_id: 1,
    }
}

fn new_animal(organization_id: i64, name: &str) -> CreateAnimal {
    CreateAnimal {
        name: name.to_string(),
        age_years: Some(3),
        age_is_estimated: None,
        species_id: Species::Dog.id(),
        breed_id: None,
        health_status_id: 1,
        adoption_description: None,
        photo_url: None,
        organization_id,
    }
}

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        name: "Ana".to_string(),
        surnames: "García López".to_string(),
        email: email.to_string(),
        phone: None,
        birth_date: None,
        sex_id: None,
        city_id: Some(1),
        organization_id: None,
        role_id: None,
        password: "unused-here".to_string(),
        password_confirmation: "unused-here".to_string(),
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|e| e.constraint())
        .map(str::to_string)
}

fn sqlstate_of(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|e| e.code())
        .map(|c| c.into_owned())
}

// ---------------------------------------------------------------------------
// Animals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_animal(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Refugio Norte"))
        .await
        .unwrap();
    let animal = AnimalRepo::create(&pool, &new_animal(org.id, "Luna"))
        .await
        .unwrap();

    assert_eq!(animal.name, "Luna");
    assert_eq!(animal.organization_id, org.id);
    assert!(animal.age_is_estimated); // default

    let found = AnimalRepo::find_by_id(&pool, animal.id).await.unwrap();
    assert_matches!(found, Some(a) if a.id == animal.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_animal_keeps_omitted_fields(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Refugio Sur"))
        .await
        .unwrap();
    let animal = AnimalRepo::create(&pool, &new_animal(org.id, "Toby"))
        .await
        .unwrap();

    let updated = AnimalRepo::update(
        &pool,
        animal.id,
        &UpdateAnimal {
            health_status_id: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("animal should exist");

    assert_eq!(updated.health_status_id, 2);
    assert_eq!(updated.name, "Toby");
    assert_eq!(updated.age_years, Some(3));
    assert!(updated.updated_at >= animal.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let result = AnimalRepo::update(
        &pool,
        999_999,
        &UpdateAnimal {
            name: Some("Ghost".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(result.is_none(), "Updating non-existent ID should return None");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_fk_violation_animal_bad_organization(pool: PgPool) {
    let err = AnimalRepo::create(&pool, &new_animal(999_999, "Orphan"))
        .await
        .unwrap_err();
    assert_eq!(sqlstate_of(&err).as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_check_violation_animal_age(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Refugio Este"))
        .await
        .unwrap();
    let mut input = new_animal(org.id, "Matusalén");
    input.age_years = Some(90);

    let err = AnimalRepo::create(&pool, &input).await.unwrap_err();
    assert_eq!(sqlstate_of(&err).as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_animals_paged_with_total(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Refugio Centro"))
        .await
        .unwrap();
    for i in 0..5 {
        AnimalRepo::create(&pool, &new_animal(org.id, &format!("Dog {i}")))
            .await
            .unwrap();
    }
    let mut cat = new_animal(org.id, "Michi");
    cat.species_id = Species::Cat.id();
    AnimalRepo::create(&pool, &cat).await.unwrap();

    let page = AnimalRepo::list(&pool, &AnimalFilter::default(), PageRequest::new(Some(2), Some(1)))
        .await
        .unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.items.len(), 2);

    let dogs = AnimalRepo::list(
        &pool,
        &AnimalFilter {
            species_id: Some(Species::Dog.id()),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(dogs.total, 5);
    assert!(dogs.items.iter().all(|a| a.species_id == Species::Dog.id()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_offset_past_end_keeps_total(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Refugio Oeste"))
        .await
        .unwrap();
    AnimalRepo::create(&pool, &new_animal(org.id, "Solo"))
        .await
        .unwrap();

    let page = AnimalRepo::list(&pool, &AnimalFilter::default(), PageRequest::new(Some(10), Some(50)))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_empty_table(pool: PgPool) {
    let page = AnimalRepo::list(&pool, &AnimalFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_organization_email_lowercased_and_city_filter(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Protectora"))
        .await
        .unwrap();
    assert_eq!(org.email.as_deref(), Some("contact@shelter.org"));

    let mut elsewhere = new_organization("Lejana");
    elsewhere.city_id = 2;
    OrganizationRepo::create(&pool, &elsewhere).await.unwrap();

    let page = OrganizationRepo::list(
        &pool,
        &OrganizationFilter { city_id: Some(1) },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, org.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_organization_with_animals_is_restricted(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Ocupada"))
        .await
        .unwrap();
    AnimalRepo::create(&pool, &new_animal(org.id, "Rex"))
        .await
        .unwrap();

    let err = OrganizationRepo::delete(&pool, org.id).await.unwrap_err();
    assert_eq!(sqlstate_of(&err).as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_nonexistent_returns_false(pool: PgPool) {
    let result = OrganizationRepo::delete(&pool, 999_999).await.unwrap();
    assert!(!result, "Deleting non-existent ID should return false");
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_email_folded_and_unique(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Ana@Example.COM"), "hash")
        .await
        .unwrap();
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role_id, Role::Member.id());
    assert!(user.is_active);

    let err = UserRepo::create(&pool, &new_user("ANA@example.com"), "hash")
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_users_email"));

    let found = UserRepo::find_by_id(&pool, user.id).await.unwrap();
    assert_matches!(found, Some(u) if u.email == "ana@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_update_and_filter(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("one@example.com"), "hash")
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("two@example.com"), "hash")
        .await
        .unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.email, "one@example.com");

    let inactive = UserRepo::list(
        &pool,
        &UserFilter {
            is_active: Some(false),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(inactive.total, 1);
    assert_eq!(inactive.items[0].id, user.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_hash_is_stored_but_not_selected(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("secret@example.com"), "$argon2id$fake")
        .await
        .unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());

    let hash = UserRepo::password_hash(&pool, user.id).await.unwrap();
    assert_eq!(hash.as_deref(), Some("$argon2id$fake"));
}

// ---------------------------------------------------------------------------
// Adoption requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_adoption_request_lifecycle(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Adopta"))
        .await
        .unwrap();
    let animal = AnimalRepo::create(&pool, &new_animal(org.id, "Nala"))
        .await
        .unwrap();

    let request = AdoptionRequestRepo::create(
        &pool,
        &CreateAdoptionRequest {
            animal_id: animal.id,
            user_id: None,
            message: Some("Tengo jardín".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("animal exists");
    assert_eq!(request.request_status_id, RequestStatus::Pending.id());
    assert!(!request.is_finalized());

    let reviewing = AdoptionRequestRepo::update(
        &pool,
        request.id,
        &UpdateAdoptionRequest {
            request_status_id: Some(RequestStatus::UnderReview.id()),
            message: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!reviewing.is_finalized());
    assert_eq!(reviewing.message.as_deref(), Some("Tengo jardín"));

    let approved = AdoptionRequestRepo::update(
        &pool,
        request.id,
        &UpdateAdoptionRequest {
            request_status_id: Some(RequestStatus::Approved.id()),
            message: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(approved.is_finalized());

    // Frozen once final: the guarded update matches nothing.
    let frozen = AdoptionRequestRepo::update(
        &pool,
        request.id,
        &UpdateAdoptionRequest {
            request_status_id: Some(RequestStatus::Pending.id()),
            message: None,
        },
    )
    .await
    .unwrap();
    assert!(frozen.is_none());

    let still = AdoptionRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still.request_status_id, RequestStatus::Approved.id());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_adoption_request_for_missing_animal_returns_none(pool: PgPool) {
    let result = AdoptionRequestRepo::create(
        &pool,
        &CreateAdoptionRequest {
            animal_id: 999_999,
            user_id: None,
            message: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_adoption_requests_filtered_by_animal(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Filtro"))
        .await
        .unwrap();
    let a = AnimalRepo::create(&pool, &new_animal(org.id, "A")).await.unwrap();
    let b = AnimalRepo::create(&pool, &new_animal(org.id, "B")).await.unwrap();
    for animal_id in [a.id, a.id, b.id] {
        AdoptionRequestRepo::create(
            &pool,
            &CreateAdoptionRequest {
                animal_id,
                user_id: None,
                message: None,
            },
        )
        .await
        .unwrap();
    }

    let page = AdoptionRequestRepo::list(
        &pool,
        &AdoptionRequestFilter {
            animal_id: Some(a.id),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|r| r.animal_id == a.id));
}

// ---------------------------------------------------------------------------
// Medical history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_medical_history_scoped_to_animal(pool: PgPool) {
    let org = OrganizationRepo::create(&pool, &new_organization("Vet"))
        .await
        .unwrap();
    let luna = AnimalRepo::create(&pool, &new_animal(org.id, "Luna")).await.unwrap();
    let toby = AnimalRepo::create(&pool, &new_animal(org.id, "Toby")).await.unwrap();

    let entry = MedicalHistoryRepo::create(
        &pool,
        luna.id,
        &CreateMedicalHistoryEntry {
            event_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            event_type: "vaccination".to_string(),
            diagnosis: None,
            details: Some("Rabies".to_string()),
            veterinarian: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    // Wrong animal in the key pair: invisible, not updatable, not deletable.
    assert!(MedicalHistoryRepo::find_by_id(&pool, toby.id, entry.id)
        .await
        .unwrap()
        .is_none());
    assert!(MedicalHistoryRepo::update(
        &pool,
        toby.id,
        entry.id,
        &UpdateMedicalHistoryEntry {
            diagnosis: Some("n/a".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .is_none());
    assert!(!MedicalHistoryRepo::delete(&pool, toby.id, entry.id).await.unwrap());

    let luna_history = MedicalHistoryRepo::list_by_animal(&pool, luna.id, PageRequest::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(luna_history.total, 1);

    let toby_history = MedicalHistoryRepo::list_by_animal(&pool, toby.id, PageRequest::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(toby_history.total, 0);

    assert!(MedicalHistoryRepo::list_by_animal(&pool, 999_999, PageRequest::default())
        .await
        .unwrap()
        .is_none());

    assert!(MedicalHistoryRepo::delete(&pool, luna.id, entry.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_lookup_lists_and_breed_filter(pool: PgPool) {
    let species = LookupRepo::list(&pool, LookupKind::Species, None).await.unwrap();
    assert_eq!(species[0].name, "Dog");
    assert!(species.iter().all(|s| s.species_id.is_none()));

    let cat_breeds = LookupRepo::list(&pool, LookupKind::Breeds, Some(Species::Cat.id()))
        .await
        .unwrap();
    assert!(!cat_breeds.is_empty());
    assert!(cat_breeds
        .iter()
        .all(|b| b.species_id == Some(Species::Cat.id())));

    for kind in LookupKind::ALL {
        let entries = LookupRepo::list(&pool, kind, None).await.unwrap();
        assert!(!entries.is_empty(), "{} should be seeded", kind.slug());
    }
}
