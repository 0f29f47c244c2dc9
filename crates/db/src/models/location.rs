//! Location entity model and DTOs.

use laundry_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Name given to a location created without one.
pub const DEFAULT_LOCATION_NAME: &str = "unnamed-location";

/// A row from the `location` table. Serializes as `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLocation {
    /// Defaults to [`DEFAULT_LOCATION_NAME`] if omitted.
    pub name: Option<String>,
}
