//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Present only on the `postgres` backend
    pub db: Option<DatabaseConnection>,
}
