//! Machine entity model, DTOs and the client-facing view.

use laundry_core::session;
use laundry_core::types::{DbId, MachineStatusId, UnixSeconds};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `machine` table.
///
/// `status` is the stored override, not what clients see. Use
/// [`Machine::effective_status`] or [`Machine::view`] for the live values.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Machine {
    pub id: DbId,
    pub washer: bool,
    pub status: MachineStatusId,
    pub last_session_start: Option<UnixSeconds>,
    pub last_session_duration: Option<i64>,
    pub location_id: DbId,
}

impl Machine {
    pub fn time_remaining(&self, now: UnixSeconds) -> i64 {
        session::time_remaining(self.last_session_start, self.last_session_duration, now)
    }

    pub fn effective_status(&self, now: UnixSeconds) -> MachineStatusId {
        session::effective_status(
            self.status,
            self.last_session_start,
            self.last_session_duration,
            now,
        )
    }

    /// Wire representation with status and time derived at `now`.
    pub fn view(&self, now: UnixSeconds) -> MachineView {
        MachineView {
            id: self.id,
            location: self.location_id,
            washer: self.washer,
            status: self.effective_status(now),
            time_remaining: self.time_remaining(now),
        }
    }
}

/// What clients receive for a machine: `{id, location, washer, status, time_remaining}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineView {
    pub id: DbId,
    /// The owning location's id.
    pub location: DbId,
    pub washer: bool,
    pub status: MachineStatusId,
    pub time_remaining: i64,
}

/// DTO for creating a new machine.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMachine {
    pub location_id: DbId,
    /// Defaults to `true` (washer) if omitted.
    pub washer: Option<bool>,
    /// Defaults to 0 (available) if omitted.
    pub status: Option<MachineStatusId>,
}
