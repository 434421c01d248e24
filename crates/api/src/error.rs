use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dogland_core::error::CoreError;
use dogland_core::validation::FieldViolation;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dogland_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (unparseable JSON, bad query string).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Error body: `{ success: false, message, code, errors? }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

struct Classified {
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Option<Vec<FieldViolation>>,
}

impl Classified {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            errors: None,
        }
    }

    fn with_errors(mut self, errors: Vec<FieldViolation>) -> Self {
        self.errors = Some(errors);
        self
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let classified = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => Classified::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidFields(violations) => {
                    tracing::debug!(count = violations.len(), "Request failed validation");
                    Classified::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed")
                        .with_errors(violations)
                }
                CoreError::Conflict(msg) => Classified::new(StatusCode::CONFLICT, "CONFLICT", msg),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                Classified::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Classified::internal()
            }
        };

        let body = ErrorBody {
            success: false,
            message: classified.message,
            code: classified.code,
            errors: classified.errors,
        };

        (classified.status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a `uq_`-prefixed constraint map to 409.
/// - A reference to a missing row maps to 400 naming the column; deleting a
///   row that is still referenced maps to 409.
/// - Check constraint violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => {
            Classified::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => {
            let detail = db_err
                .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                .and_then(|pg| pg.detail());

            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return Classified::new(
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                // foreign_key_violation
                Some("23503") => {
                    if detail.is_some_and(|d| d.contains("is still referenced")) {
                        return Classified::new(
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            "Resource is still referenced by other records",
                        );
                    }
                    let field = detail.and_then(key_column).unwrap_or("reference");
                    let message = format!("{field} references a record that does not exist");
                    return Classified::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &message)
                        .with_errors(vec![FieldViolation::new(field, "exists", message)]);
                }
                // check_violation
                Some("23514") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    let field = db_err
                        .table()
                        .and_then(|t| check_column(constraint, t))
                        .unwrap_or(constraint);
                    let message = format!("{field} is out of the allowed range");
                    return Classified::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &message)
                        .with_errors(vec![FieldViolation::new(field, "check", message)]);
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            Classified::internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Classified::internal()
        }
    }
}

/// Extract the column from a PostgreSQL key detail such as
/// `Key (organization_id)=(42) is not present in table "organizations".`
fn key_column(detail: &str) -> Option<&str> {
    let rest = detail.strip_prefix("Key (")?;
    let end = rest.find(")=")?;
    Some(&rest[..end])
}

/// Recover the column from PostgreSQL's default check constraint name,
/// `<table>_<column>_check`.
fn check_column<'a>(constraint: &'a str, table: &str) -> Option<&'a str> {
    constraint
        .strip_prefix(table)?
        .strip_prefix('_')?
        .strip_suffix("_check")
}
