//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;
use serde_json::Value;

use crate::state::AppState;

async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = match &state.db {
        Some(db) => {
            let check: HealthCheckFuture =
                Box::pin(async move { check_health(db).await.map_err(|e| e.to_string()) });
            vec![("database", check)]
        }
        None => {
            // The in-memory store cannot be disconnected
            let check: HealthCheckFuture = Box::pin(async { Ok(()) });
            vec![("store", check)]
        }
    };

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
