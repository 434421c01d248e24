//! Handlers for the `/organizations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_db::models::organization::Organization;
use dogland_db::repositories::OrganizationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::organization::{
    CreateOrganizationRequest, ListOrganizationsRequest, UpdateOrganizationRequest,
};
use crate::schemas::IdRequest;
use crate::state::AppState;

const ENTITY: &str = "Organization";

/// POST /api/organizations
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateOrganizationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Organization>>)> {
    let organization = OrganizationRepo::create(&state.pool, &req.body).await?;
    tracing::info!(organization_id = organization.id, "Organization created");
    Ok(ApiResponse::created(organization))
}

/// GET /api/organizations
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListOrganizationsRequest>,
) -> AppResult<Json<ApiResponse<Vec<Organization>>>> {
    let window = req.query.page.page();
    let page = OrganizationRepo::list(&state.pool, &req.query.filter, window).await?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/organizations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<Organization>>> {
    let id = req.params.id;
    let organization = OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(organization))
}

/// PUT /api/organizations/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateOrganizationRequest>,
) -> AppResult<Json<ApiResponse<Organization>>> {
    let id = req.params.id;
    let organization = OrganizationRepo::update(&state.pool, id, &req.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(organization))
}

/// DELETE /api/organizations/{id}
///
/// Refused with 409 while animals still belong to the organization.
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.id;
    if !OrganizationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    tracing::info!(organization_id = id, "Organization deleted");
    Ok(ApiResponse::message("Organization deleted"))
}
