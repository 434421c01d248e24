use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when Postgres does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Open connections, busy or idle.
    pub connections: u32,
    pub idle_connections: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = match dogland_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health probe could not reach the database");
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            connections: state.pool.size(),
            idle_connections: state.pool.num_idle(),
        },
    })
}

/// `/health` lives beside `/api`, not under it, so probes skip the API
/// prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
