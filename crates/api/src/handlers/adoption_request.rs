//! Handlers for the `/adoption-requests` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_core::validation::FieldViolation;
use dogland_db::models::adoption_request::AdoptionRequest;
use dogland_db::repositories::AdoptionRequestRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::adoption_request::{
    CreateAdoptionRequestRequest, ListAdoptionRequestsRequest, UpdateAdoptionRequestRequest,
    ANIMAL_FIELD,
};
use crate::schemas::IdRequest;
use crate::state::AppState;

const ENTITY: &str = "Adoption request";

/// POST /api/adoption-requests
///
/// The animal must exist and not be soft-deleted; otherwise the reference
/// is reported as a validation error on `id_adopcion`.
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateAdoptionRequestRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdoptionRequest>>)> {
    let request = AdoptionRequestRepo::create(&state.pool, &req.body)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidFields(vec![FieldViolation::new(
                ANIMAL_FIELD,
                "exists",
                format!("{ANIMAL_FIELD} references an animal that does not exist"),
            )]))
        })?;

    tracing::info!(
        request_id = request.id,
        animal_id = request.animal_id,
        "Adoption request filed"
    );

    Ok(ApiResponse::created(request))
}

/// GET /api/adoption-requests
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListAdoptionRequestsRequest>,
) -> AppResult<Json<ApiResponse<Vec<AdoptionRequest>>>> {
    let window = req.query.page.page();
    let page = AdoptionRequestRepo::list(&state.pool, &req.query.filter, window).await?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/adoption-requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<AdoptionRequest>>> {
    let id = req.params.id;
    let request = AdoptionRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(request))
}

/// PUT /api/adoption-requests/{id}
///
/// A finalized request (approved, rejected or cancelled) can no longer be
/// changed and yields 409.
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateAdoptionRequestRequest>,
) -> AppResult<Json<ApiResponse<AdoptionRequest>>> {
    let id = req.params.id;

    if let Some(request) = AdoptionRequestRepo::update(&state.pool, id, &req.body).await? {
        if request.is_finalized() {
            tracing::info!(
                request_id = id,
                status_id = request.request_status_id,
                "Adoption request finalized"
            );
        }
        return Ok(ApiResponse::ok(request));
    }

    // The guarded update matched nothing: missing or already final.
    match AdoptionRequestRepo::find_by_id(&state.pool, id).await? {
        Some(existing) if existing.is_finalized() => Err(AppError::Core(CoreError::Conflict(
            format!("Adoption request {id} is finalized and can no longer be changed"),
        ))),
        _ => Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id })),
    }
}

/// DELETE /api/adoption-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.id;
    if !AdoptionRequestRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    Ok(ApiResponse::message("Adoption request deleted"))
}
