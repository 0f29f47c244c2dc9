//! Repository for the `location` table.

use laundry_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::location::{CreateLocation, Location, DEFAULT_LOCATION_NAME};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    ///
    /// If `name` is `None` in the input, defaults to [`DEFAULT_LOCATION_NAME`].
    pub async fn create(pool: &SqlitePool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let name = input.name.as_deref().unwrap_or(DEFAULT_LOCATION_NAME);
        let query = format!("INSERT INTO location (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM location WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a location with the given ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM location WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// List all locations in creation order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM location ORDER BY id ASC");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// Delete a location and every machine that belongs to it.
    ///
    /// Returns the deleted row, or `None` if no location with `id` exists.
    /// Machines are removed explicitly in the same transaction, so the result
    /// does not depend on the connection having foreign keys enabled.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM location WHERE id = $1");
        let Some(location) = sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let machines = sqlx::query("DELETE FROM machine WHERE location_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM location WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(location_id = id, machines, "Cascaded location delete");
        Ok(Some(location))
    }
}
