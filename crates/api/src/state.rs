use std::sync::Arc;

use laundry_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: laundry_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Time source for session starts and status derivation.
    pub clock: Arc<dyn Clock>,
}
