use axum::routing::get;
use axum::Router;

use crate::handlers::{animal, medical_history};
use crate::state::AppState;

/// Routes mounted at `/animals`, including the nested medical history.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(animal::list).post(animal::create))
        .route(
            "/{id}",
            get(animal::get_by_id)
                .put(animal::update)
                .delete(animal::delete),
        )
        .route(
            "/{id}/medical-history",
            get(medical_history::list).post(medical_history::create),
        )
        .route(
            "/{id}/medical-history/{history_id}",
            get(medical_history::get_by_id)
                .put(medical_history::update)
                .delete(medical_history::delete),
        )
}
