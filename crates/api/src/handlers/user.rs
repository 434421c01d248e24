//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dogland_core::error::CoreError;
use dogland_db::models::user::User;
use dogland_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::validation::ValidatedRequest;
use crate::response::ApiResponse;
use crate::schemas::user::{CreateUserRequest, ListUsersRequest, UpdateUserRequest};
use crate::schemas::IdRequest;
use crate::state::AppState;

const ENTITY: &str = "User";

/// POST /api/users
///
/// Hashes the password with Argon2id. A duplicate email, compared
/// case-insensitively, yields 409.
pub async fn create(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let password_hash = hash_password(&req.body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(&state.pool, &req.body, &password_hash).await?;

    tracing::info!(user_id = user.id, role_id = user.role_id, "User registered");

    Ok(ApiResponse::created(user))
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<ListUsersRequest>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let window = req.query.page.page();
    let page = UserRepo::list(&state.pool, &req.query.filter, window).await?;
    Ok(ApiResponse::paginated(page, window))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let id = req.params.id;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(user))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let id = req.params.id;
    let user = UserRepo::update(&state.pool, id, &req.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(ApiResponse::ok(user))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedRequest(req): ValidatedRequest<IdRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = req.params.id;
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }
    tracing::info!(user_id = id, "User deleted");
    Ok(ApiResponse::message("User deleted"))
}
