//! Repository for the `adoption_requests` table.

use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::PgPool;

use super::{paged_query, rows_to_page};
use crate::models::adoption_request::{
    AdoptionRequest, AdoptionRequestFilter, CreateAdoptionRequest, UpdateAdoptionRequest,
};
use crate::models::status::RequestStatus;

const COLUMNS: &str = "id, animal_id, user_id, request_status_id, message, finalized_at, \
    created_at, updated_at";

/// Provides CRUD operations for adoption requests.
pub struct AdoptionRequestRepo;

impl AdoptionRequestRepo {
    /// File a new request in the pending state.
    ///
    /// Returns `None` when the animal does not exist or has been
    /// soft-deleted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdoptionRequest,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoption_requests (animal_id, user_id, request_status_id, message)
             SELECT a.id, $2, $3, $4 FROM animals a
             WHERE a.id = $1 AND a.deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(input.animal_id)
            .bind(input.user_id)
            .bind(RequestStatus::Pending.id())
            .bind(&input.message)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests WHERE id = $1");
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests matching the filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &AdoptionRequestFilter,
        page: PageRequest,
    ) -> Result<Page<AdoptionRequest>, sqlx::Error> {
        let filtered = format!(
            "SELECT {COLUMNS} FROM adoption_requests
             WHERE ($1::BIGINT IS NULL OR animal_id = $1)
               AND ($2::BIGINT IS NULL OR user_id = $2)
               AND ($3::SMALLINT IS NULL OR request_status_id = $3)"
        );
        let query = paged_query(&filtered, "created_at DESC, id DESC", 4);
        let rows = sqlx::query(&query)
            .bind(filter.animal_id)
            .bind(filter.user_id)
            .bind(filter.request_status_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;
        rows_to_page(rows)
    }

    /// Update a request that has not been finalized yet.
    ///
    /// Moving to a final status stamps `finalized_at`, after which the row
    /// no longer matches. Returns `None` both for a missing row and for a
    /// finalized one; callers tell them apart with [`Self::find_by_id`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdoptionRequest,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE adoption_requests SET
                request_status_id = COALESCE($2, request_status_id),
                message = COALESCE($3, message),
                finalized_at = CASE
                    WHEN (SELECT is_final FROM request_statuses
                          WHERE id = COALESCE($2, adoption_requests.request_status_id))
                    THEN NOW() ELSE NULL END
             WHERE id = $1 AND finalized_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdoptionRequest>(&query)
            .bind(id)
            .bind(input.request_status_id)
            .bind(&input.message)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM adoption_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
