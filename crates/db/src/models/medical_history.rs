//! Medical history entries, always scoped to one animal.

use chrono::NaiveDate;
use dogland_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `medical_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalHistoryEntry {
    pub id: DbId,
    pub animal_id: DbId,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub diagnosis: Option<String>,
    pub details: Option<String>,
    pub veterinarian: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending an entry. The animal comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedicalHistoryEntry {
    pub event_date: NaiveDate,
    pub event_type: String,
    pub diagnosis: Option<String>,
    pub details: Option<String>,
    pub veterinarian: Option<String>,
}

/// DTO for correcting an entry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMedicalHistoryEntry {
    pub event_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub diagnosis: Option<String>,
    pub details: Option<String>,
    pub veterinarian: Option<String>,
}
