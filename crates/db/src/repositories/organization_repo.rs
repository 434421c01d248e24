//! Repository for the `organizations` table.

use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::PgPool;

use super::{paged_query, rows_to_page};
use crate::models::organization::{
    CreateOrganization, Organization, OrganizationFilter, UpdateOrganization,
};

const COLUMNS: &str = "id, name, phone, email, address, city_id, created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, phone, email, address, city_id)
             VALUES ($1, $2, LOWER($3), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(input.city_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List organizations alphabetically.
    pub async fn list(
        pool: &PgPool,
        filter: &OrganizationFilter,
        page: PageRequest,
    ) -> Result<Page<Organization>, sqlx::Error> {
        let filtered = format!(
            "SELECT {COLUMNS} FROM organizations
             WHERE ($1::SMALLINT IS NULL OR city_id = $1)"
        );
        let query = paged_query(&filtered, "name ASC, id ASC", 2);
        let rows = sqlx::query(&query)
            .bind(filter.city_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;
        rows_to_page(rows)
    }

    /// Update an organization. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE(LOWER($4), email),
                address = COALESCE($5, address),
                city_id = COALESCE($6, city_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(input.city_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an organization. Fails with a foreign key violation while
    /// animals still belong to it; member users are detached.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
