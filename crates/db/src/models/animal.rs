//! Animal entity model and DTOs.

use dogland_core::types::{DbId, LookupId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An animal row from the `animals` table. Soft-deleted rows are never
/// loaded into this type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub name: String,
    pub age_years: Option<i16>,
    /// `true` when `age_years` is an estimate rather than a known age.
    pub age_is_estimated: bool,
    pub species_id: LookupId,
    /// `None` for animals of unspecified breed.
    pub breed_id: Option<LookupId>,
    pub health_status_id: LookupId,
    pub adoption_description: Option<String>,
    pub photo_url: Option<String>,
    pub organization_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the intake form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnimal {
    pub name: String,
    pub age_years: Option<i16>,
    /// Defaults to `true` if omitted.
    pub age_is_estimated: Option<bool>,
    pub species_id: LookupId,
    pub breed_id: Option<LookupId>,
    pub health_status_id: LookupId,
    pub adoption_description: Option<String>,
    pub photo_url: Option<String>,
    pub organization_id: DbId,
}

/// DTO for staff updates. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnimal {
    pub name: Option<String>,
    pub age_years: Option<i16>,
    pub age_is_estimated: Option<bool>,
    pub species_id: Option<LookupId>,
    pub breed_id: Option<LookupId>,
    pub health_status_id: Option<LookupId>,
    pub adoption_description: Option<String>,
    pub photo_url: Option<String>,
    pub organization_id: Option<DbId>,
}

/// Equality filters for listing animals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalFilter {
    pub species_id: Option<LookupId>,
    pub breed_id: Option<LookupId>,
    pub health_status_id: Option<LookupId>,
    pub organization_id: Option<DbId>,
}
