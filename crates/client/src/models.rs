//! Wire models as the API serializes them.
//!
//! These mirror the server rows but only derive what the client needs:
//! responses are deserialized, payloads serialized.

use chrono::NaiveDate;
use dogland_core::types::{DbId, LookupId, Timestamp};
use serde::{Deserialize, Serialize};

/// A list resource served at `/api/{PATH}` with `/{id}` item routes.
pub trait Resource: serde::de::DeserializeOwned + Clone + Send + Sync + 'static {
    const PATH: &'static str;

    fn id(&self) -> DbId;

    fn species_id(&self) -> Option<LookupId> {
        None
    }

    fn breed_id(&self) -> Option<LookupId> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Animal {
    pub id: DbId,
    pub name: String,
    pub age_years: Option<i16>,
    pub age_is_estimated: bool,
    pub species_id: LookupId,
    pub breed_id: Option<LookupId>,
    pub health_status_id: LookupId,
    pub adoption_description: Option<String>,
    pub photo_url: Option<String>,
    pub organization_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for Animal {
    const PATH: &'static str = "animals";

    fn id(&self) -> DbId {
        self.id
    }

    fn species_id(&self) -> Option<LookupId> {
        Some(self.species_id)
    }

    fn breed_id(&self) -> Option<LookupId> {
        self.breed_id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewAnimal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_is_estimated: Option<bool>,
    pub species_id: LookupId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed_id: Option<LookupId>,
    pub health_status_id: LookupId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub organization_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sighting {
    pub id: DbId,
    pub species_id: LookupId,
    pub health_status_id: LookupId,
    pub sighting_status_id: LookupId,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub photo_url: Option<String>,
    pub reported_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl Resource for Sighting {
    const PATH: &'static str = "sightings";

    fn id(&self) -> DbId {
        self.id
    }

    fn species_id(&self) -> Option<LookupId> {
        Some(self.species_id)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSighting {
    pub species_id: LookupId,
    pub health_status_id: LookupId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    #[serde(rename = "id_adopcion")]
    pub animal_id: DbId,
    pub user_id: Option<DbId>,
    pub request_status_id: LookupId,
    pub message: Option<String>,
    pub finalized_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for AdoptionRequest {
    const PATH: &'static str = "adoption-requests";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAdoptionRequest {
    #[serde(rename = "id_adopcion")]
    pub animal_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city_id: LookupId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for Organization {
    const PATH: &'static str = "organizations";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub surnames: String,
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

impl Resource for User {
    const PATH: &'static str = "users";

    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Serialize)]
pub struct NewMedicalHistoryEntry {
    pub event_date: NaiveDate,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupEntry {
    pub id: LookupId,
    pub name: String,
    #[serde(default)]
    pub species_id: Option<LookupId>,
}
