//! Repository for the `animals` table.

use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::PgPool;

use super::{paged_query, rows_to_page};
use crate::models::animal::{Animal, AnimalFilter, CreateAnimal, UpdateAnimal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age_years, age_is_estimated, species_id, breed_id, \
    health_status_id, adoption_description, photo_url, organization_id, created_at, updated_at";

/// Provides CRUD operations for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Insert a new animal, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnimal) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "INSERT INTO animals (name, age_years, age_is_estimated, species_id, breed_id, \
                health_status_id, adoption_description, photo_url, organization_id)
             VALUES ($1, $2, COALESCE($3, TRUE), $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(&input.name)
            .bind(input.age_years)
            .bind(input.age_is_estimated)
            .bind(input.species_id)
            .bind(input.breed_id)
            .bind(input.health_status_id)
            .bind(&input.adoption_description)
            .bind(&input.photo_url)
            .bind(input.organization_id)
            .fetch_one(pool)
            .await
    }

    /// Find an animal by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animals WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List animals matching the filters, newest first. Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &AnimalFilter,
        page: PageRequest,
    ) -> Result<Page<Animal>, sqlx::Error> {
        let filtered = format!(
            "SELECT {COLUMNS} FROM animals
             WHERE deleted_at IS NULL
               AND ($1::SMALLINT IS NULL OR species_id = $1)
               AND ($2::SMALLINT IS NULL OR breed_id = $2)
               AND ($3::SMALLINT IS NULL OR health_status_id = $3)
               AND ($4::BIGINT IS NULL OR organization_id = $4)"
        );
        let query = paged_query(&filtered, "created_at DESC, id DESC", 5);
        let rows = sqlx::query(&query)
            .bind(filter.species_id)
            .bind(filter.breed_id)
            .bind(filter.health_status_id)
            .bind(filter.organization_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;
        rows_to_page(rows)
    }

    /// Update an animal. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animals SET
                name = COALESCE($2, name),
                age_years = COALESCE($3, age_years),
                age_is_estimated = COALESCE($4, age_is_estimated),
                species_id = COALESCE($5, species_id),
                breed_id = COALESCE($6, breed_id),
                health_status_id = COALESCE($7, health_status_id),
                adoption_description = COALESCE($8, adoption_description),
                photo_url = COALESCE($9, photo_url),
                organization_id = COALESCE($10, organization_id)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age_years)
            .bind(input.age_is_estimated)
            .bind(input.species_id)
            .bind(input.breed_id)
            .bind(input.health_status_id)
            .bind(&input.adoption_description)
            .bind(&input.photo_url)
            .bind(input.organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an animal by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE animals SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an animal by ID, soft-deleted or not. Returns
    /// `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
