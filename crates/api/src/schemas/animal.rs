use std::sync::LazyLock;

use dogland_core::validation::{RequestSchema, Schema};
use dogland_db::models::animal::{AnimalFilter, CreateAnimal, UpdateAnimal};
use serde::Deserialize;

use super::{id_params, lookup_id, page_query, record_id, required_if, IdParams};
use crate::middleware::validation::Validated;
use crate::query::ListQuery;

const MAX_AGE_YEARS: f64 = 40.0;

fn animal_body(required: bool) -> Schema {
    Schema::new()
        .field("name", |f| required_if(f, required).string().min_length(1).max_length(100))
        .field("age_years", |f| f.integer().range(0.0, MAX_AGE_YEARS))
        .field("age_is_estimated", |f| f.boolean())
        .field("species_id", |f| lookup_id(required_if(f, required)))
        .field("breed_id", lookup_id)
        .field("health_status_id", |f| lookup_id(required_if(f, required)))
        .field("adoption_description", |f| f.string().max_length(2000))
        .field("photo_url", |f| f.string().url())
        .field("organization_id", |f| record_id(required_if(f, required)))
}

static LIST: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().query(
        page_query()
            .field("species_id", lookup_id)
            .field("breed_id", lookup_id)
            .field("health_status_id", lookup_id)
            .field("organization_id", record_id),
    )
});

static CREATE: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().body(animal_body(true)));

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new()
        .params(id_params())
        .body(animal_body(false).require_any_field())
});

static DELETE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new()
        .params(id_params())
        .query(Schema::new().field("permanent", |f| f.flag()))
});

#[derive(Debug, Deserialize)]
pub struct ListAnimalsRequest {
    pub query: ListQuery<AnimalFilter>,
}

impl Validated for ListAnimalsRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAnimalRequest {
    pub body: CreateAnimal,
}

impl Validated for CreateAnimalRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnimalRequest {
    pub params: IdParams,
    pub body: UpdateAnimal,
}

impl Validated for UpdateAnimalRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteAnimalQuery {
    /// Remove the row instead of marking it deleted.
    #[serde(default)]
    pub permanent: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAnimalRequest {
    pub params: IdParams,
    pub query: DeleteAnimalQuery,
}

impl Validated for DeleteAnimalRequest {
    fn schema() -> &'static RequestSchema {
        &DELETE
    }
}
