//! Sighting model and DTOs.

use dogland_core::geo::Coordinate;
use dogland_core::types::{DbId, LookupId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sightings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
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
    /// Distance from the search center; only present on radius searches.
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Sighting {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// DTO for reporting a sighting. The status always starts as reported.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSighting {
    pub species_id: LookupId,
    pub health_status_id: LookupId,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub photo_url: Option<String>,
    pub reported_by: Option<DbId>,
}

/// DTO for staff follow-up. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSighting {
    pub species_id: Option<LookupId>,
    pub health_status_id: Option<LookupId>,
    pub sighting_status_id: Option<LookupId>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_url: Option<String>,
}

/// Equality filters plus optional radius search for listing sightings.
///
/// `latitude`, `longitude` and `radius_km` are validated to arrive together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SightingFilter {
    pub species_id: Option<LookupId>,
    pub health_status_id: Option<LookupId>,
    pub sighting_status_id: Option<LookupId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

impl SightingFilter {
    /// Center and radius of the search area, if one was requested.
    pub fn radius(&self) -> Option<(Coordinate, f64)> {
        match (self.latitude, self.longitude, self.radius_km) {
            (Some(lat), Some(lon), Some(r)) => Some((Coordinate::new(lat, lon), r)),
            _ => None,
        }
    }
}
