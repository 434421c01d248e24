//! Repository for the `medical_history` table.
//!
//! Every statement is keyed by the owning animal, and entries of a
//! soft-deleted animal are treated as gone.

use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::{PgPool, Row};

use super::rows_to_page;
use crate::models::medical_history::{
    CreateMedicalHistoryEntry, MedicalHistoryEntry, UpdateMedicalHistoryEntry,
};

const COLUMNS: &str = "id, animal_id, event_date, event_type, diagnosis, details, veterinarian, \
    created_at, updated_at";

const LIVE_ANIMAL: &str =
    "EXISTS (SELECT 1 FROM animals a WHERE a.id = medical_history.animal_id AND a.deleted_at IS NULL)";

pub struct MedicalHistoryRepo;

impl MedicalHistoryRepo {
    /// Append an entry to an animal's history.
    ///
    /// Returns `None` when the animal does not exist or is soft-deleted.
    pub async fn create(
        pool: &PgPool,
        animal_id: DbId,
        input: &CreateMedicalHistoryEntry,
    ) -> Result<Option<MedicalHistoryEntry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO medical_history (animal_id, event_date, event_type, diagnosis, details, veterinarian)
             SELECT a.id, $2, $3, $4, $5, $6 FROM animals a
             WHERE a.id = $1 AND a.deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalHistoryEntry>(&query)
            .bind(animal_id)
            .bind(input.event_date)
            .bind(&input.event_type)
            .bind(&input.diagnosis)
            .bind(&input.details)
            .bind(&input.veterinarian)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        animal_id: DbId,
        id: DbId,
    ) -> Result<Option<MedicalHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM medical_history
             WHERE animal_id = $1 AND id = $2 AND {LIVE_ANIMAL}"
        );
        sqlx::query_as::<_, MedicalHistoryEntry>(&query)
            .bind(animal_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an animal's history, most recent event first.
    ///
    /// Returns `None` when the animal does not exist, so an unknown animal
    /// is distinguishable from one with an empty history.
    pub async fn list_by_animal(
        pool: &PgPool,
        animal_id: DbId,
        page: PageRequest,
    ) -> Result<Option<Page<MedicalHistoryEntry>>, sqlx::Error> {
        let query = format!(
            "WITH parent AS (
                 SELECT id FROM animals WHERE id = $1 AND deleted_at IS NULL
             ),
             filtered AS (
                 SELECT {COLUMNS} FROM medical_history
                 WHERE animal_id = (SELECT id FROM parent)
             )
             SELECT EXISTS (SELECT 1 FROM parent) AS parent_exists,
                    (SELECT COUNT(*) FROM filtered) AS total_count,
                    page.*
             FROM (SELECT 1) AS anchor
             LEFT JOIN (
                 SELECT * FROM filtered ORDER BY event_date DESC, id DESC
                 LIMIT $2 OFFSET $3
             ) AS page ON TRUE
             ORDER BY page.event_date DESC, page.id DESC"
        );
        let rows = sqlx::query(&query)
            .bind(animal_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;

        let parent_exists = match rows.first() {
            Some(row) => row.try_get::<bool, _>("parent_exists")?,
            None => false,
        };
        if !parent_exists {
            return Ok(None);
        }
        rows_to_page(rows).map(Some)
    }

    /// Update an entry. Returns `None` if no entry `id` belongs to the animal.
    pub async fn update(
        pool: &PgPool,
        animal_id: DbId,
        id: DbId,
        input: &UpdateMedicalHistoryEntry,
    ) -> Result<Option<MedicalHistoryEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE medical_history SET
                event_date = COALESCE($3, event_date),
                event_type = COALESCE($4, event_type),
                diagnosis = COALESCE($5, diagnosis),
                details = COALESCE($6, details),
                veterinarian = COALESCE($7, veterinarian)
             WHERE animal_id = $1 AND id = $2 AND {LIVE_ANIMAL}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalHistoryEntry>(&query)
            .bind(animal_id)
            .bind(id)
            .bind(input.event_date)
            .bind(&input.event_type)
            .bind(&input.diagnosis)
            .bind(&input.details)
            .bind(&input.veterinarian)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, animal_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM medical_history WHERE animal_id = $1 AND id = $2 AND {LIVE_ANIMAL}"
        );
        let result = sqlx::query(&query)
            .bind(animal_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
