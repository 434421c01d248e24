use std::sync::LazyLock;

use dogland_core::types::DbId;
use dogland_core::validation::{RequestSchema, Schema};
use dogland_db::models::medical_history::{CreateMedicalHistoryEntry, UpdateMedicalHistoryEntry};
use serde::Deserialize;

use super::{id_params, page_query, record_id, required_if, IdParams};
use crate::middleware::validation::Validated;
use crate::query::PaginationParams;

fn entry_params() -> Schema {
    id_params().field("history_id", |f| record_id(f.required()))
}

fn entry_body(required: bool) -> Schema {
    Schema::new()
        .field("event_date", |f| required_if(f, required).string().date())
        .field("event_type", |f| {
            required_if(f, required).string().min_length(1).max_length(100)
        })
        .field("diagnosis", |f| f.string().max_length(500))
        .field("details", |f| f.string().max_length(2000))
        .field("veterinarian", |f| f.string().max_length(150))
}

static LIST: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().params(id_params()).query(page_query()));

static CREATE: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().params(id_params()).body(entry_body(true)));

static ENTRY: LazyLock<RequestSchema> = LazyLock::new(|| RequestSchema::new().params(entry_params()));

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new()
        .params(entry_params())
        .body(entry_body(false).require_any_field())
});

/// `{id}/medical-history/{history_id}`: the animal and one of its entries.
#[derive(Debug, Deserialize)]
pub struct EntryParams {
    pub id: DbId,
    pub history_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct ListHistoryRequest {
    pub params: IdParams,
    pub query: PaginationParams,
}

impl Validated for ListHistoryRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHistoryRequest {
    pub params: IdParams,
    pub body: CreateMedicalHistoryEntry,
}

impl Validated for CreateHistoryRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

/// Get or delete one entry.
#[derive(Debug, Deserialize)]
pub struct HistoryEntryRequest {
    pub params: EntryParams,
}

impl Validated for HistoryEntryRequest {
    fn schema() -> &'static RequestSchema {
        &ENTRY
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHistoryRequest {
    pub params: EntryParams,
    pub body: UpdateMedicalHistoryEntry,
}

impl Validated for UpdateHistoryRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}
