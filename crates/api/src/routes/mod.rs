pub mod adoption_request;
pub mod animal;
pub mod health;
pub mod lookup;
pub mod organization;
pub mod sighting;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lookups/{kind}                                   list catalog (GET)
///
/// /animals                                          list, create
/// /animals/{id}                                     get, update, delete (?permanent=true)
/// /animals/{id}/medical-history                     list, create
/// /animals/{id}/medical-history/{history_id}        get, update, delete
///
/// /adoption-requests                                list, create
/// /adoption-requests/{id}                           get, update, delete
///
/// /sightings                                        list (radius search), create
/// /sightings/{id}                                   get, update, delete
///
/// /organizations                                    list, create
/// /organizations/{id}                               get, update, delete
///
/// /users                                            list, create
/// /users/{id}                                       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/lookups", lookup::router())
        .nest("/animals", animal::router())
        .nest("/adoption-requests", adoption_request::router())
        .nest("/sightings", sighting::router())
        .nest("/organizations", organization::router())
        .nest("/users", user::router())
}
