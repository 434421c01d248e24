//! Handlers for the `/sightings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_db::models::sighting::Sighting;
use dogland_db::repositories::SightingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::sighting::{CreateSightingRequest, ListSightingsRequest, UpdateSightingRequest};
use crate::schemas::IdRequest;
use crate::state::AppState;

const ENTITY: &str = "Sighting";

/// POST /api/sightings
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateSightingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Sighting>>)> {
    let sighting = SightingRepo::create(&state.pool, &req.body).await?;

    tracing::info!(
        sighting_id = sighting.id,
        latitude = sighting.latitude,
        longitude = sighting.longitude,
        "Sighting reported"
    );

    Ok(ApiResponse::created(sighting))
}

/// GET /api/sightings[?latitude=&longitude=&radius_km=]
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListSightingsRequest>,
) -> AppResult<Json<ApiResponse<Vec<Sighting>>>> {
    let window = req.query.page.page();
    let page = SightingRepo::list(&state.pool, &req.query.filter, window).await?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/sightings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<Sighting>>> {
    let id = req.params.id;
    let sighting = SightingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(sighting))
}

/// PUT /api/sightings/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateSightingRequest>,
) -> AppResult<Json<ApiResponse<Sighting>>> {
    let id = req.params.id;
    let sighting = SightingRepo::update(&state.pool, id, &req.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(sighting))
}

/// DELETE /api/sightings/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.id;
    if !SightingRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    Ok(ApiResponse::message("Sighting deleted"))
}
