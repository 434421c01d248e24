//! Handlers for the `/animals` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_db::models::animal::Animal;
use dogland_db::repositories::AnimalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::animal::{
    CreateAnimalRequest, DeleteAnimalRequest, ListAnimalsRequest, UpdateAnimalRequest,
};
use crate::schemas::IdRequest;
use crate::state::AppState;

const ENTITY: &str = "Animal";

/// POST /api/animals
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateAnimalRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Animal>>)> {
    let animal = AnimalRepo::create(&state.pool, &req.body).await?;

    tracing::info!(
        animal_id = animal.id,
        organization_id = animal.organization_id,
        "Animal registered"
    );

    Ok(ApiResponse::created(animal))
}

/// GET /api/animals
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListAnimalsRequest>,
) -> AppResult<Json<ApiResponse<Vec<Animal>>>> {
    let window = req.query.page.page();
    let page = AnimalRepo::list(&state.pool, &req.query.filter, window).await?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/animals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<Animal>>> {
    let id = req.params.id;
    let animal = AnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(animal))
}

/// PUT /api/animals/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateAnimalRequest>,
) -> AppResult<Json<ApiResponse<Animal>>> {
    let id = req.params.id;
    let animal = AnimalRepo::update(&state.pool, id, &req.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(animal))
}

/// DELETE /api/animals/{id}[?permanent=true]
///
/// Soft-deletes by default; `permanent=true` removes the row along with its
/// medical history and adoption requests.
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<DeleteAnimalRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.id;
    let permanent = req.query.permanent;

    let deleted = if permanent {
        AnimalRepo::hard_delete(&state.pool, id).await?
    } else {
        AnimalRepo::soft_delete(&state.pool, id).await?
    };

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(animal_id = id, permanent, "Animal deleted");

    let message = if permanent {
        "Animal permanently deleted"
    } else {
        "Animal deleted"
    };
    Ok(ApiResponse::message(message))
}
