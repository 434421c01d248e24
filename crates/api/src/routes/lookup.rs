use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Routes mounted at `/lookups`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{kind}", get(lookup::list))
}
