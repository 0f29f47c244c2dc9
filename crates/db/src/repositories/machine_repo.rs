//! Repository for the `machine` table.

use laundry_core::session::STATUS_AVAILABLE;
use laundry_core::types::{DbId, MachineStatusId, UnixSeconds};
use sqlx::SqlitePool;

use crate::models::machine::{CreateMachine, Machine};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, washer, status, last_session_start, last_session_duration, location_id";

/// Provides CRUD and session operations for machines.
pub struct MachineRepo;

impl MachineRepo {
    /// Insert a new machine with no session recorded, returning the created row.
    ///
    /// `washer` defaults to `true` and `status` to 0 (available). The caller
    /// is expected to have checked that `location_id` exists.
    pub async fn create(pool: &SqlitePool, input: &CreateMachine) -> Result<Machine, sqlx::Error> {
        let query = format!(
            "INSERT INTO machine (washer, status, location_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(input.washer.unwrap_or(true))
            .bind(input.status.unwrap_or(STATUS_AVAILABLE))
            .bind(input.location_id)
            .fetch_one(pool)
            .await
    }

    /// Find a machine by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM machine WHERE id = $1");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the machines at a location in creation order.
    pub async fn list_by_location(
        pool: &SqlitePool,
        location_id: DbId,
    ) -> Result<Vec<Machine>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM machine WHERE location_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Machine>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Record a new session window, overwriting any previous one.
    ///
    /// Returns `None` if no machine with the given `id` exists.
    pub async fn start_session(
        pool: &SqlitePool,
        id: DbId,
        started_at: UnixSeconds,
        duration: i64,
    ) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!(
            "UPDATE machine SET
                last_session_start = $2,
                last_session_duration = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .bind(started_at)
            .bind(duration)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stored status override.
    ///
    /// Returns `None` if no machine with the given `id` exists.
    pub async fn set_status(
        pool: &SqlitePool,
        id: DbId,
        status: MachineStatusId,
    ) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("UPDATE machine SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a machine. Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("DELETE FROM machine WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
