//! Handlers for `/animals/{id}/medical-history`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_core::types::DbId;
use dogland_db::models::medical_history::MedicalHistoryEntry;
use dogland_db::repositories::MedicalHistoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::medical_history::{
    CreateHistoryRequest, HistoryEntryRequest, ListHistoryRequest, UpdateHistoryRequest,
};
use crate::state::AppState;

const ENTITY: &str = "Medical history entry";

fn animal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Animal",
        id,
    })
}

/// POST /api/animals/{id}/medical-history
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateHistoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MedicalHistoryEntry>>)> {
    let animal_id = req.params.id;
    let entry = MedicalHistoryRepo::create(&state.pool, animal_id, &req.body)
        .await?
        .ok_or_else(|| animal_not_found(animal_id))?;

    tracing::info!(
        animal_id,
        entry_id = entry.id,
        event_type = %entry.event_type,
        "Medical history recorded"
    );

    Ok(ApiResponse::created(entry))
}

/// GET /api/animals/{id}/medical-history
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListHistoryRequest>,
) -> AppResult<Json<ApiResponse<Vec<MedicalHistoryEntry>>>> {
    let animal_id = req.params.id;
    let window = req.query.page();
    let page = MedicalHistoryRepo::list_by_animal(&state.pool, animal_id, window)
        .await?
        .ok_or_else(|| animal_not_found(animal_id))?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/animals/{id}/medical-history/{history_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<HistoryEntryRequest>,
) -> AppResult<Json<ApiResponse<MedicalHistoryEntry>>> {
    let id = req.params.history_id;
    let entry = MedicalHistoryRepo::find_by_id(&state.pool, req.params.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(entry))
}

/// PUT /api/animals/{id}/medical-history/{history_id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateHistoryRequest>,
) -> AppResult<Json<ApiResponse<MedicalHistoryEntry>>> {
    let id = req.params.history_id;
    let entry = MedicalHistoryRepo::update(&state.pool, req.params.id, id, &req.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(entry))
}

/// DELETE /api/animals/{id}/medical-history/{history_id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<HistoryEntryRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.history_id;
    if !MedicalHistoryRepo::delete(&state.pool, req.params.id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    Ok(ApiResponse::message("Medical history entry deleted"))
}
