//! Request schemas and the typed request shapes they validate.
//!
//! Each resource module pairs a `LazyLock<RequestSchema>` with the struct the
//! normalized request deserializes into, tied together by [`Validated`].

pub mod adoption_request;
pub mod animal;
pub mod lookup;
pub mod medical_history;
pub mod organization;
pub mod sighting;
pub mod user;

use std::sync::LazyLock;

use dogland_core::pagination::MAX_PAGE_LIMIT;
use dogland_core::types::DbId;
use dogland_core::validation::{FieldSpec, RequestSchema, Schema};
use serde::Deserialize;

use crate::middleware::validation::Validated;

/// Largest id a SMALLSERIAL lookup table can hand out.
pub const MAX_LOOKUP_ID: f64 = i16::MAX as f64;

/// Reference to a lookup catalog row.
pub fn lookup_id(f: FieldSpec) -> FieldSpec {
    f.digits().range(1.0, MAX_LOOKUP_ID)
}

/// Reference to an entity row.
pub fn record_id(f: FieldSpec) -> FieldSpec {
    f.digits().min(1.0)
}

/// Create payloads require a field that update payloads leave optional.
pub fn required_if(f: FieldSpec, required: bool) -> FieldSpec {
    if required {
        f.required()
    } else {
        f
    }
}

/// `{id}` path parameter.
pub fn id_params() -> Schema {
    Schema::new().field("id", |f| record_id(f.required()))
}

/// `limit` / `offset` query parameters. Resource filters are added on top.
pub fn page_query() -> Schema {
    Schema::new()
        .field("limit", |f| f.digits().range(1.0, MAX_PAGE_LIMIT as f64))
        .field("offset", |f| f.digits())
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: DbId,
}

static ID_ONLY: LazyLock<RequestSchema> =
    LazyLock::new(|| RequestSchema::new().params(id_params()));

/// Any request addressed by a single `{id}` and nothing else.
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub params: IdParams,
}

impl Validated for IdRequest {
    fn schema() -> &'static RequestSchema {
        &ID_ONLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogland_core::validation::RawRequest;
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn page_query_bounds() {
        let schema = page_query();
        for (query, ok) in [
            (json!({}), true),
            (json!({"limit": "1", "offset": "0"}), true),
            (json!({"limit": "100"}), true),
            (json!({"limit": "0"}), false),
            (json!({"limit": "101"}), false),
            (json!({"offset": "-1"}), false),
            (json!({"limit": "ten"}), false),
        ] {
            assert_eq!(schema.validate(&object(query.clone())).is_ok(), ok, "{query}");
        }
    }

    #[test]
    fn id_request_rejects_non_digits() {
        let raw = RawRequest {
            params: object(json!({"id": "12a"})),
            ..Default::default()
        };
        let errors = IdRequest::schema().validate(&raw).unwrap_err();
        assert_eq!(errors[0].field, "id");
        assert_eq!(errors[0].rule, "digits");
    }
}
