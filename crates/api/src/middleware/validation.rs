//! Schema-validating request extractor.
//!
//! Handlers never see unvalidated input: [`ValidatedRequest<T>`] runs the
//! [`RequestSchema`] attached to `T` over the path params, query string and
//! JSON body, reports every violation at once, and only then deserializes
//! the normalized `{ params, query, body }` object into `T`.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! pub struct GetAnimal {
//!     pub params: IdParams,
//! }
//!
//! impl Validated for GetAnimal {
//!     fn schema() -> &'static RequestSchema {
//!         &ID_ONLY
//!     }
//! }
//!
//! async fn get_by_id(ValidatedRequest(req): ValidatedRequest<GetAnimal>) { .. }
//! ```

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use dogland_core::error::CoreError;
use dogland_core::validation::{FieldViolation, RawRequest, RequestSchema, ROOT_FIELD};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// A request shape with a schema describing its valid inputs.
pub trait Validated: DeserializeOwned {
    fn schema() -> &'static RequestSchema;
}

/// Extractor yielding a `T` built from validated, normalized request parts.
#[derive(Debug)]
pub struct ValidatedRequest<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedRequest<T>
where
    S: Send + Sync,
    T: Validated,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let schema = T::schema();
        let (mut parts, body) = req.into_parts();
        let mut raw = RawRequest::default();

        if schema.params.is_some() {
            let Path(params) = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            raw.params = strings_to_map(params);
        }

        if schema.query.is_some() {
            let Query(query) = Query::<HashMap<String, String>>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            raw.query = strings_to_map(query);
        }

        if schema.body.is_some() {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            raw.body = parse_body(&bytes)?;
        }

        let normalized = schema
            .validate(&raw)
            .map_err(|violations| AppError::Core(CoreError::InvalidFields(violations)))?;

        let value = serde_json::from_value(Value::Object(normalized))
            .map_err(|e| AppError::BadRequest(format!("Invalid request: {e}")))?;

        Ok(ValidatedRequest(value))
    }
}

fn strings_to_map(values: HashMap<String, String>) -> Map<String, Value> {
    values
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

/// Parse a JSON object body. An empty body counts as `{}` so that the
/// schema, not the parser, reports missing fields.
fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Core(CoreError::InvalidFields(vec![
            FieldViolation::new(ROOT_FIELD, "type", "Request body must be a JSON object"),
        ]))),
        Err(e) => Err(AppError::BadRequest(format!("Malformed JSON body: {e}"))),
    }
}
