//! Products API routes

use axum::Router;
use domain_products::{InMemoryProductStore, PgProductStore, ProductService, handlers};

use crate::state::AppState;

/// Create products router over the configured store
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(ProductService::new(PgProductStore::new(db.clone()))),
        None => handlers::router(ProductService::new(InMemoryProductStore::new())),
    }
}
