use crate::types::DbId;
use crate::validation::FieldViolation;

/// Domain failures shared by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Field-level violations produced by the schema validator.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldViolation>),

    /// The target exists but its state forbids the operation.
    #[error("Conflict: {0}")]
    Conflict(String),
}
