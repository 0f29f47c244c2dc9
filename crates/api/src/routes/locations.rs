use axum::routing::{get, post};
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Location routes, mounted under `/api`.
///
/// ```text
/// GET    /locations/                 -> list_locations
/// POST   /locations/create/          -> create_location
/// GET    /locations/{id}/            -> get_location
/// DELETE /locations/{id}/            -> delete_location
/// GET    /locations/{id}/machines/   -> list_location_machines
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations/", get(locations::list_locations))
        .route("/locations/create/", post(locations::create_location))
        .route(
            "/locations/{id}/",
            get(locations::get_location).delete(locations::delete_location),
        )
        .route(
            "/locations/{id}/machines/",
            get(locations::list_location_machines),
        )
}
