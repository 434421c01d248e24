//! Read-only lookup catalogs (species, breeds, statuses, cities, ...).

use dogland_core::types::LookupId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The lookup catalogs exposed under `/api/lookups/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    Species,
    Breeds,
    HealthStatuses,
    SightingStatuses,
    RequestStatuses,
    Sexes,
    Cities,
    Roles,
}

impl LookupKind {
    pub const ALL: [LookupKind; 8] = [
        LookupKind::Species,
        LookupKind::Breeds,
        LookupKind::HealthStatuses,
        LookupKind::SightingStatuses,
        LookupKind::RequestStatuses,
        LookupKind::Sexes,
        LookupKind::Cities,
        LookupKind::Roles,
    ];

    /// Backing table name. Only ever interpolated from this fixed set.
    pub fn table(self) -> &'static str {
        match self {
            LookupKind::Species => "species",
            LookupKind::Breeds => "breeds",
            LookupKind::HealthStatuses => "health_statuses",
            LookupKind::SightingStatuses => "sighting_statuses",
            LookupKind::RequestStatuses => "request_statuses",
            LookupKind::Sexes => "sexes",
            LookupKind::Cities => "cities",
            LookupKind::Roles => "roles",
        }
    }

    /// Path segment used in URLs.
    pub fn slug(self) -> &'static str {
        match self {
            LookupKind::Species => "species",
            LookupKind::Breeds => "breeds",
            LookupKind::HealthStatuses => "health-statuses",
            LookupKind::SightingStatuses => "sighting-statuses",
            LookupKind::RequestStatuses => "request-statuses",
            LookupKind::Sexes => "sexes",
            LookupKind::Cities => "cities",
            LookupKind::Roles => "roles",
        }
    }
}

/// One catalog row. `species_id` is only populated for breeds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LookupEntry {
    pub id: LookupId,
    pub name: String,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_id: Option<LookupId>,
}
