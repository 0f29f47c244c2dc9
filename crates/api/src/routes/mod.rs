pub mod health;
pub mod locations;
pub mod machines;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locations/                        list
/// /locations/create/                 create (POST)
/// /locations/{id}/                   get, delete
/// /locations/{id}/machines/          machines at the location
///
/// /machines/create/                  create (POST)
/// /machines/{id}/                    get, delete
/// /machines/{id}/type/               washer or dryer
/// /machines/{id}/time/               seconds remaining
/// /machines/{id}/status/             derived status (GET), set override (POST)
/// /machines/{id}/start/              start a session (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(locations::router())
        .merge(machines::router())
}
