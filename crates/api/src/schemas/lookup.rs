use std::sync::LazyLock;

use dogland_core::types::LookupId;
use dogland_core::validation::{RequestSchema, Schema};
use dogland_db::models::lookup::LookupKind;
use serde::Deserialize;
use serde_json::Value;

use super::lookup_id;
use crate::middleware::validation::Validated;

static LIST: LazyLock<RequestSchema> = LazyLock::new(|| {
    let kinds = LookupKind::ALL
        .iter()
        .map(|k| Value::String(k.slug().to_string()))
        .collect();
    RequestSchema::new()
        .params(Schema::new().field("kind", |f| f.required().one_of(kinds)))
        .query(Schema::new().field("species_id", lookup_id))
});

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub kind: LookupKind,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Only meaningful for breeds.
    pub species_id: Option<LookupId>,
}

#[derive(Debug, Deserialize)]
pub struct ListLookupRequest {
    pub params: LookupParams,
    pub query: LookupQuery,
}

impl Validated for ListLookupRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}
