//! Handler for the read-only lookup catalogs.

use axum::extract::State;
use axum::Json;
use dogland_db::models::lookup::LookupEntry;
use dogland_db::repositories::LookupRepo;

use crate::error::AppResult;
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::lookup::ListLookupRequest;
use crate::state::AppState;

/// GET /api/lookups/{kind}[?species_id=]
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListLookupRequest>,
) -> AppResult<Json<ApiResponse<Vec<LookupEntry>>>> {
    let entries = LookupRepo::list(&state.pool, req.params.kind, req.query.species_id).await?;
    Ok(ApiResponse::ok(entries))
}
