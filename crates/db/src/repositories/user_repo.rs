//! Repository for the `users` table.
//!
//! `password_hash` is written here but never read back into [`User`].

use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::PgPool;

use super::{paged_query, rows_to_page};
use crate::models::status::Role;
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};

const COLUMNS: &str = "id, name, surnames, email, phone, birth_date, sex_id, city_id, \
    organization_id, role_id, is_active, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user with an already-hashed password. The email is folded
    /// to lowercase; a duplicate trips the `uq_users_email` index.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, surnames, email, phone, birth_date, sex_id, city_id, \
                organization_id, role_id, password_hash)
             VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.surnames)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.birth_date)
            .bind(input.sex_id)
            .bind(input.city_id)
            .bind(input.organization_id)
            .bind(input.role_id.unwrap_or(Role::Member.id()))
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users by surname then name.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, sqlx::Error> {
        let filtered = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::BIGINT IS NULL OR organization_id = $1)
               AND ($2::SMALLINT IS NULL OR role_id = $2)
               AND ($3::SMALLINT IS NULL OR city_id = $3)
               AND ($4::BOOLEAN IS NULL OR is_active = $4)"
        );
        let query = paged_query(&filtered, "surnames ASC, name ASC, id ASC", 5);
        let rows = sqlx::query(&query)
            .bind(filter.organization_id)
            .bind(filter.role_id)
            .bind(filter.city_id)
            .bind(filter.is_active)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;
        rows_to_page(rows)
    }

    /// Update a user. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                surnames = COALESCE($3, surnames),
                email = COALESCE(LOWER($4), email),
                phone = COALESCE($5, phone),
                birth_date = COALESCE($6, birth_date),
                sex_id = COALESCE($7, sex_id),
                city_id = COALESCE($8, city_id),
                organization_id = COALESCE($9, organization_id),
                role_id = COALESCE($10, role_id),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.surnames)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.birth_date)
            .bind(input.sex_id)
            .bind(input.city_id)
            .bind(input.organization_id)
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the stored password hash for a user.
    pub async fn password_hash(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
