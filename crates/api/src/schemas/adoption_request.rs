use std::sync::LazyLock;

use dogland_core::validation::{RequestSchema, Schema};
use dogland_db::models::adoption_request::{
    AdoptionRequestFilter, CreateAdoptionRequest, UpdateAdoptionRequest,
};
use serde::Deserialize;

use super::{id_params, lookup_id, page_query, record_id, IdParams};
use crate::middleware::validation::Validated;
use crate::query::ListQuery;

/// Wire name of the requested animal's id.
pub const ANIMAL_FIELD: &str = "id_adopcion";

static LIST: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().query(
        page_query()
            .field(ANIMAL_FIELD, record_id)
            .field("user_id", record_id)
            .field("request_status_id", lookup_id),
    )
});

static CREATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().body(
        Schema::new()
            .field(ANIMAL_FIELD, |f| record_id(f.required()))
            .field("user_id", record_id)
            .field("message", |f| f.string().max_length(2000)),
    )
});

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().params(id_params()).body(
        Schema::new()
            .field("request_status_id", lookup_id)
            .field("message", |f| f.string().max_length(2000))
            .require_any_field(),
    )
});

#[derive(Debug, Deserialize)]
pub struct ListAdoptionRequestsRequest {
    pub query: ListQuery<AdoptionRequestFilter>,
}

impl Validated for ListAdoptionRequestsRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAdoptionRequestRequest {
    pub body: CreateAdoptionRequest,
}

impl Validated for CreateAdoptionRequestRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdoptionRequestRequest {
    pub params: IdParams,
    pub body: UpdateAdoptionRequest,
}

impl Validated for UpdateAdoptionRequestRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}
