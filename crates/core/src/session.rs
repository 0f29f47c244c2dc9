//! Machine status constants and live status derivation.
//!
//! A session is never explicitly ended. A machine is "in use" while the
//! stored end time (`last_session_start + last_session_duration`) is still
//! in the future relative to the clock reading passed in. Nothing here is
//! persisted; callers derive the values at query time.

use crate::types::{MachineStatusId, UnixSeconds};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// The machine is free.
pub const STATUS_AVAILABLE: MachineStatusId = 0;

/// A session is running.
pub const STATUS_IN_USE: MachineStatusId = 1;

/// Out of order. When stored, overrides the time-based derivation.
pub const STATUS_BROKEN: MachineStatusId = 2;

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// End of the recorded session, or `None` if no session was ever started.
pub fn session_end(
    last_session_start: Option<UnixSeconds>,
    last_session_duration: Option<i64>,
) -> Option<UnixSeconds> {
    match (last_session_start, last_session_duration) {
        (Some(start), Some(duration)) => Some(start.saturating_add(duration)),
        _ => None,
    }
}

/// Seconds left in the recorded session at `now`. Never negative.
///
/// Returns 0 when either session field is missing.
pub fn time_remaining(
    last_session_start: Option<UnixSeconds>,
    last_session_duration: Option<i64>,
    now: UnixSeconds,
) -> i64 {
    session_end(last_session_start, last_session_duration)
        .map(|end| end.saturating_sub(now).max(0))
        .unwrap_or(0)
}

/// Externally visible status at `now`.
///
/// A stored [`STATUS_BROKEN`] is sticky. Any other stored value is ignored
/// in favour of the session timing: [`STATUS_IN_USE`] while time remains,
/// [`STATUS_AVAILABLE`] otherwise.
pub fn effective_status(
    stored_status: MachineStatusId,
    last_session_start: Option<UnixSeconds>,
    last_session_duration: Option<i64>,
    now: UnixSeconds,
) -> MachineStatusId {
    if stored_status == STATUS_BROKEN {
        return STATUS_BROKEN;
    }
    if time_remaining(last_session_start, last_session_duration, now) > 0 {
        STATUS_IN_USE
    } else {
        STATUS_AVAILABLE
    }
}
