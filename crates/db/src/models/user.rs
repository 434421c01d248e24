//! User account model and DTOs.
//!
//! The password hash is stored but never selected into [`User`], so it can
//! not leak through serialization.

use chrono::NaiveDate;
use dogland_core::types::{DbId, LookupId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table (without `password_hash`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub surnames: String,
    /// Always lowercase.
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex_id: Option<LookupId>,
    pub city_id: Option<LookupId>,
    pub organization_id: Option<DbId>,
    pub role_id: LookupId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user. The password is hashed before it reaches
/// the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub surnames: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex_id: Option<LookupId>,
    pub city_id: Option<LookupId>,
    pub organization_id: Option<DbId>,
    /// Defaults to member if omitted.
    pub role_id: Option<LookupId>,
    pub password: String,
    pub password_confirmation: String,
}

/// DTO for profile / staff updates. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub surnames: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex_id: Option<LookupId>,
    pub city_id: Option<LookupId>,
    pub organization_id: Option<DbId>,
    pub role_id: Option<LookupId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub organization_id: Option<DbId>,
    pub role_id: Option<LookupId>,
    pub city_id: Option<LookupId>,
    pub is_active: Option<bool>,
}
