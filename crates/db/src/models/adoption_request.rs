//! Adoption request model and DTOs.
//!
//! On the wire the adopted animal is identified by `id_adopcion`, the name
//! the mobile client has always sent; the column is `animal_id`.

use dogland_core::types::{DbId, LookupId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `adoption_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    #[serde(rename = "id_adopcion")]
    pub animal_id: DbId,
    pub user_id: Option<DbId>,
    pub request_status_id: LookupId,
    pub message: Option<String>,
    /// Set once the status reaches a final state; the row is frozen after.
    pub finalized_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AdoptionRequest {
    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }
}

/// DTO for filing a request. New requests always start as pending.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdoptionRequest {
    #[serde(rename = "id_adopcion")]
    pub animal_id: DbId,
    pub user_id: Option<DbId>,
    pub message: Option<String>,
}

/// DTO for staff review updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdoptionRequest {
    pub request_status_id: Option<LookupId>,
    pub message: Option<String>,
}

/// Equality filters for listing adoption requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdoptionRequestFilter {
    #[serde(rename = "id_adopcion")]
    pub animal_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub request_status_id: Option<LookupId>,
}
