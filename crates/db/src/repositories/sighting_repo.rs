//! Repository for the `sightings` table, including radius search.

use dogland_core::geo::{bounding_box, EARTH_RADIUS_KM};
use dogland_core::pagination::{Page, PageRequest};
use dogland_core::types::DbId;
use sqlx::PgPool;

use super::{paged_query, rows_to_page};
use crate::models::sighting::{CreateSighting, Sighting, SightingFilter, UpdateSighting};
use crate::models::status::SightingStatus;

const COLUMNS: &str = "id, species_id, health_status_id, sighting_status_id, description, \
    address, latitude, longitude, photo_url, reported_by, created_at, updated_at";

/// Provides CRUD operations and proximity search for sightings.
pub struct SightingRepo;

impl SightingRepo {
    /// Record a new sighting. The status always starts as reported.
    pub async fn create(pool: &PgPool, input: &CreateSighting) -> Result<Sighting, sqlx::Error> {
        let query = format!(
            "INSERT INTO sightings (species_id, health_status_id, sighting_status_id, description, \
                address, latitude, longitude, photo_url, reported_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sighting>(&query)
            .bind(input.species_id)
            .bind(input.health_status_id)
            .bind(SightingStatus::Reported.id())
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.photo_url)
            .bind(input.reported_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sighting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sightings WHERE id = $1");
        sqlx::query_as::<_, Sighting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sightings matching the filters.
    ///
    /// With a radius search, only sightings within `radius_km` of the center
    /// are returned, nearest first, each carrying `distance_km`. Otherwise
    /// the newest sightings come first. A bounding box narrows candidates
    /// before the great-circle distance is computed.
    pub async fn list(
        pool: &PgPool,
        filter: &SightingFilter,
        page: PageRequest,
    ) -> Result<Page<Sighting>, sqlx::Error> {
        let radius = filter.radius();
        let bbox = radius.map(|(center, r)| bounding_box(center, r));

        let distance = format!(
            "2 * {EARTH_RADIUS_KM} * ASIN(LEAST(1.0, SQRT(
                POWER(SIN(RADIANS(latitude - $4) / 2), 2)
                + COS(RADIANS($4)) * COS(RADIANS(latitude))
                * POWER(SIN(RADIANS(longitude - $5) / 2), 2)
            )))"
        );
        let filtered = format!(
            "SELECT * FROM (
                SELECT {COLUMNS},
                    CASE WHEN $4::DOUBLE PRECISION IS NULL OR $5::DOUBLE PRECISION IS NULL
                        THEN NULL ELSE {distance} END AS distance_km
                FROM sightings
                WHERE ($1::SMALLINT IS NULL OR species_id = $1)
                  AND ($2::SMALLINT IS NULL OR health_status_id = $2)
                  AND ($3::SMALLINT IS NULL OR sighting_status_id = $3)
                  AND ($7::DOUBLE PRECISION IS NULL OR latitude BETWEEN $7 AND $8::DOUBLE PRECISION)
                  AND ($9::DOUBLE PRECISION IS NULL OR longitude BETWEEN $9 AND $10::DOUBLE PRECISION)
             ) AS candidates
             WHERE $6::DOUBLE PRECISION IS NULL OR distance_km <= $6"
        );
        let query = paged_query(
            &filtered,
            "distance_km ASC NULLS LAST, created_at DESC, id DESC",
            11,
        );

        let rows = sqlx::query(&query)
            .bind(filter.species_id)
            .bind(filter.health_status_id)
            .bind(filter.sighting_status_id)
            .bind(radius.map(|(c, _)| c.latitude))
            .bind(radius.map(|(c, _)| c.longitude))
            .bind(radius.map(|(_, r)| r))
            .bind(bbox.map(|b| b.min_latitude))
            .bind(bbox.map(|b| b.max_latitude))
            .bind(bbox.map(|b| b.min_longitude))
            .bind(bbox.map(|b| b.max_longitude))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;
        rows_to_page(rows)
    }

    /// Update a sighting. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSighting,
    ) -> Result<Option<Sighting>, sqlx::Error> {
        let query = format!(
            "UPDATE sightings SET
                species_id = COALESCE($2, species_id),
                health_status_id = COALESCE($3, health_status_id),
                sighting_status_id = COALESCE($4, sighting_status_id),
                description = COALESCE($5, description),
                address = COALESCE($6, address),
                latitude = COALESCE($7, latitude),
                longitude = COALESCE($8, longitude),
                photo_url = COALESCE($9, photo_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sighting>(&query)
            .bind(id)
            .bind(input.species_id)
            .bind(input.health_status_id)
            .bind(input.sighting_status_id)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.photo_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sightings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
