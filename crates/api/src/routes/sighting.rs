use axum::routing::get;
use axum::Router;

use crate::handlers::sighting;
use crate::state::AppState;

/// Routes mounted at `/sightings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sighting::list).post(sighting::create))
        .route(
            "/{id}",
            get(sighting::get_by_id)
                .put(sighting::update)
                .delete(sighting::delete),
        )
}
