//! Handlers for machines: creation, lookups, session start, status
//! override and deletion.
//!
//! Every response that includes status or time remaining derives them from
//! the stored session fields and a single clock reading taken in the handler.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::error::CoreError;
use laundry_core::types::{DbId, MachineStatusId};
use laundry_db::models::machine::CreateMachine;
use laundry_db::repositories::{LocationRepo, MachineRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::body::parse_json_body;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Machine";

const MISSING_LOCATION_ID: &str = "Could not create machine without specification of location ID.";
const MISSING_DURATION: &str =
    "Could not start machine timer without specification of the session duration.";
const MISSING_STATUS: &str = "Could not update machine status without specification of the status.";

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/machines/create/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMachineRequest {
    pub location_id: Option<DbId>,
    pub washer: Option<bool>,
    #[validate(range(min = 0, max = 2, message = "status must be 0, 1 or 2"))]
    pub status: Option<MachineStatusId>,
}

/// Body of `POST /api/machines/{id}/status/`.
#[derive(Debug, Deserialize, Validate)]
pub struct SetStatusRequest {
    #[validate(range(min = 0, max = 2, message = "status must be 0, 1 or 2"))]
    pub status: Option<MachineStatusId>,
}

#[derive(Debug, Serialize)]
pub struct MachineTypeResponse {
    pub washer: bool,
}

#[derive(Debug, Serialize)]
pub struct TimeRemainingResponse {
    pub time_remaining: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: MachineStatusId,
}

fn validate<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// POST /api/machines/create/
///
/// Body `{location_id, washer?, status?}`. The location must already exist.
pub async fn create_machine(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateMachineRequest = parse_json_body(&body)?;
    let location_id = input
        .location_id
        .ok_or_else(|| AppError::BadRequest(MISSING_LOCATION_ID.to_string()))?;
    validate(&input)?;

    if !LocationRepo::exists(&state.pool, location_id).await? {
        return Err(AppError::not_found("Location", location_id));
    }

    let machine = MachineRepo::create(
        &state.pool,
        &CreateMachine {
            location_id,
            washer: input.washer,
            status: input.status,
        },
    )
    .await?;

    tracing::info!(
        machine_id = machine.id,
        location_id,
        washer = machine.washer,
        status = machine.status,
        "Machine created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(machine.view(state.clock.now()))),
    ))
}

/// DELETE /api/machines/{id}/
///
/// Responds with the deleted machine as it looked at deletion time.
pub async fn delete_machine(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::delete(&state.pool, machine_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    tracing::info!(machine_id, location_id = machine.location_id, "Machine deleted");

    Ok(Json(DataResponse::new(machine.view(state.clock.now()))))
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// GET /api/machines/{id}/
pub async fn get_machine(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::find_by_id(&state.pool, machine_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    Ok(Json(DataResponse::new(machine.view(state.clock.now()))))
}

/// GET /api/machines/{id}/type/
///
/// `washer` is true for a washer, false for a dryer.
pub async fn get_machine_type(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::find_by_id(&state.pool, machine_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    Ok(Json(DataResponse::new(MachineTypeResponse {
        washer: machine.washer,
    })))
}

/// GET /api/machines/{id}/time/
///
/// Seconds left in the current session, 0 when idle.
pub async fn get_machine_time_remaining(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::find_by_id(&state.pool, machine_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    Ok(Json(DataResponse::new(TimeRemainingResponse {
        time_remaining: machine.time_remaining(state.clock.now()),
    })))
}

/// GET /api/machines/{id}/status/
///
/// 0 available, 1 in use, 2 broken.
pub async fn get_machine_status(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::find_by_id(&state.pool, machine_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    Ok(Json(DataResponse::new(StatusResponse {
        status: machine.effective_status(state.clock.now()),
    })))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/machines/{id}/start/
///
/// Body `{duration}` in seconds; must be a JSON integer. Starts a session
/// now, replacing any session already running on the machine.
pub async fn start_machine(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if MachineRepo::find_by_id(&state.pool, machine_id).await?.is_none() {
        return Err(AppError::not_found(ENTITY, machine_id));
    }

    let payload: serde_json::Value = parse_json_body(&body)?;
    let duration = payload
        .get("duration")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| AppError::BadRequest(MISSING_DURATION.to_string()))?;

    let started_at = state.clock.now();
    let machine = MachineRepo::start_session(&state.pool, machine_id, started_at, duration)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    tracing::info!(machine_id, started_at, duration, "Machine session started");

    Ok(Json(DataResponse::new(machine.view(started_at))))
}

/// POST /api/machines/{id}/status/
///
/// Body `{status}`. Overwrites the stored override; the only way to take a
/// machine out of (or put it into) the broken state after creation.
pub async fn set_machine_status(
    State(state): State<AppState>,
    Path(machine_id): Path<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if MachineRepo::find_by_id(&state.pool, machine_id).await?.is_none() {
        return Err(AppError::not_found(ENTITY, machine_id));
    }

    let input: SetStatusRequest = parse_json_body(&body)?;
    let status = input
        .status
        .ok_or_else(|| AppError::BadRequest(MISSING_STATUS.to_string()))?;
    validate(&input)?;

    let machine = MachineRepo::set_status(&state.pool, machine_id, status)
        .await?
        .ok_or(AppError::not_found(ENTITY, machine_id))?;

    tracing::info!(machine_id, status, "Machine status override updated");

    Ok(Json(DataResponse::new(machine.view(state.clock.now()))))
}
