use axum::routing::{get, post};
use axum::Router;

use crate::handlers::machines;
use crate::state::AppState;

/// Machine routes, mounted under `/api`.
///
/// ```text
/// POST   /machines/create/           -> create_machine
/// GET    /machines/{id}/             -> get_machine
/// DELETE /machines/{id}/             -> delete_machine
/// GET    /machines/{id}/type/        -> get_machine_type
/// GET    /machines/{id}/time/        -> get_machine_time_remaining
/// GET    /machines/{id}/status/      -> get_machine_status
/// POST   /machines/{id}/status/      -> set_machine_status
/// POST   /machines/{id}/start/       -> start_machine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/machines/create/", post(machines::create_machine))
        .route(
            "/machines/{id}/",
            get(machines::get_machine).delete(machines::delete_machine),
        )
        .route("/machines/{id}/type/", get(machines::get_machine_type))
        .route(
            "/machines/{id}/time/",
            get(machines::get_machine_time_remaining),
        )
        .route(
            "/machines/{id}/status/",
            get(machines::get_machine_status).post(machines::set_machine_status),
        )
        .route("/machines/{id}/start/", post(machines::start_machine))
}
