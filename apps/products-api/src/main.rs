//! Products API - REST server

use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StoreBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match &config.store {
        StoreBackend::Memory => {
            info!("Using in-memory product store");
            None
        }
        StoreBackend::Postgres(pg) => {
            info!(
                max_connections = pg.max_connections,
                "Connecting to PostgreSQL product store"
            );
            let db = connect_from_config_with_retry(pg.clone(), RetryConfig::default()).await?;
            run_migrations::<Migrator>(&db, config.app.name).await?;
            Some(db)
        }
    };

    let state = AppState { db };

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.server).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()));

    info!(
        name = config.app.name,
        version = config.app.version,
        address = %config.server.address(),
        "Starting Products API"
    );

    create_production_app(app, &config.server, async move {
        if let Some(db) = state.db {
            close_postgres(db, "products").await;
        }
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
