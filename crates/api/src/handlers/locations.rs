//! Handlers for locations and the machines listed under them.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::types::DbId;
use laundry_db::models::location::CreateLocation;
use laundry_db::models::machine::MachineView;
use laundry_db::repositories::{LocationRepo, MachineRepo};

use crate::body::parse_json_body;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Location";

/// GET /api/locations/
pub async fn list_locations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(locations)))
}

/// GET /api/locations/{id}/
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let location = LocationRepo::find_by_id(&state.pool, location_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, location_id))?;

    Ok(Json(DataResponse::new(location)))
}

/// POST /api/locations/create/
///
/// Body `{name?}`. An omitted or null name becomes `unnamed-location`.
pub async fn create_location(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateLocation = parse_json_body(&body)?;
    let location = LocationRepo::create(&state.pool, &input).await?;

    tracing::info!(location_id = location.id, name = %location.name, "Location created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(location))))
}

/// DELETE /api/locations/{id}/
///
/// Deletes the location and all of its machines. Responds with the
/// deleted location.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let location = LocationRepo::delete(&state.pool, location_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, location_id))?;

    tracing::info!(location_id, "Location deleted");

    Ok(Json(DataResponse::new(location)))
}

/// GET /api/locations/{id}/machines/
///
/// Machines at the location with status and time remaining derived now.
pub async fn list_location_machines(
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LocationRepo::exists(&state.pool, location_id).await? {
        return Err(AppError::not_found(ENTITY, location_id));
    }

    let machines = MachineRepo::list_by_location(&state.pool, location_id).await?;
    let now = state.clock.now();
    let views: Vec<MachineView> = machines.iter().map(|m| m.view(now)).collect();

    Ok(Json(DataResponse::new(views)))
}
