use std::sync::LazyLock;

use dogland_core::validation::{RequestSchema, Schema};
use dogland_db::models::organization::{
    CreateOrganization, OrganizationFilter, UpdateOrganization,
};
use serde::Deserialize;

use super::{id_params, lookup_id, page_query, required_if, IdParams};
use crate::middleware::validation::Validated;
use crate::query::ListQuery;

/// Digits with optional leading `+` and common separators.
pub const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 ()-]{5,19}$";

fn organization_body(required: bool) -> Schema {
    Schema::new()
        .field("name", |f| {
            required_if(f, required).string().min_length(1).max_length(150)
        })
        .field("phone", |f| {
            f.string()
                .pattern(PHONE_PATTERN)
                .message("phone must be a valid phone number")
        })
        .field("email", |f| f.string().email())
        .field("address", |f| f.string().max_length(300))
        .field("city_id", |f| lookup_id(required_if(f, required)))
}

static LIST: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().query(page_query().field("city_id", lookup_id)));

static CREATE: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().body(organization_body(true)));

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new()
        .params(id_params())
        .body(organization_body(false).require_any_field())
});

#[derive(Debug, Deserialize)]
pub struct ListOrganizationsRequest {
    pub query: ListQuery<OrganizationFilter>,
}

impl Validated for ListOrganizationsRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub body: CreateOrganization,
}

impl Validated for CreateOrganizationRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub params: IdParams,
    pub body: UpdateOrganization,
}

impl Validated for UpdateOrganizationRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}
