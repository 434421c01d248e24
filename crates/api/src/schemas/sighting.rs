use std::sync::LazyLock;

use dogland_core::geo::{MAX_LATITUDE, MAX_LONGITUDE, MAX_RADIUS_KM, MIN_LATITUDE, MIN_LONGITUDE};
use dogland_core::validation::{FieldSpec, Refinement, RequestSchema, Schema};
use dogland_db::models::sighting::{CreateSighting, SightingFilter, UpdateSighting};
use serde::Deserialize;

use super::{id_params, lookup_id, page_query, record_id, required_if, IdParams};
use crate::middleware::validation::Validated;
use crate::query::ListQuery;

fn latitude(f: FieldSpec) -> FieldSpec {
    f.numeric().range(MIN_LATITUDE, MAX_LATITUDE)
}

fn longitude(f: FieldSpec) -> FieldSpec {
    f.numeric().range(MIN_LONGITUDE, MAX_LONGITUDE)
}

fn sighting_body(required: bool) -> Schema {
    Schema::new()
        .field("species_id", |f| lookup_id(required_if(f, required)))
        .field("health_status_id", |f| lookup_id(required_if(f, required)))
        .field("description", |f| f.string().max_length(2000))
        .field("address", |f| f.string().max_length(300))
        .field("latitude", |f| latitude(required_if(f, required)))
        .field("longitude", |f| longitude(required_if(f, required)))
        .field("photo_url", |f| f.string().url())
}

static LIST: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().query(
        page_query()
            .field("species_id", lookup_id)
            .field("health_status_id", lookup_id)
            .field("sighting_status_id", lookup_id)
            .field("latitude", latitude)
            .field("longitude", longitude)
            .field("radius_km", |f| {
                f.numeric()
                    .min(f64::MIN_POSITIVE)
                    .message("radius_km must be greater than 0")
                    .max(MAX_RADIUS_KM)
            })
            .refine(Refinement::RequiredTogether {
                fields: vec![
                    "latitude".to_string(),
                    "longitude".to_string(),
                    "radius_km".to_string(),
                ],
                message: "latitude, longitude and radius_km must be supplied together"
                    .to_string(),
            }),
    )
});

static CREATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().body(sighting_body(true).field("reported_by", record_id))
});

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().params(id_params()).body(
        sighting_body(false)
            .field("sighting_status_id", lookup_id)
            .require_any_field(),
    )
});

#[derive(Debug, Deserialize)]
pub struct ListSightingsRequest {
    pub query: ListQuery<SightingFilter>,
}

impl Validated for ListSightingsRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSightingRequest {
    pub body: CreateSighting,
}

impl Validated for CreateSightingRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSightingRequest {
    pub params: IdParams,
    pub body: UpdateSighting,
}

impl Validated for UpdateSightingRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}
