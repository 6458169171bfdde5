use std::sync::Arc;

use empires_app::{app::AppBus, config::Config, workers::EconomyWorker};
use empires_core::{ApplicationError, Result};
use empires_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use empires_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, app_bus, worker) = setup_app().await?;
    let state = AppState::new(app_bus);

    worker.run();
    WebRouter::serve(state, config.http_port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>, Arc<EconomyWorker>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    tracing::info!(
        production = ?config.rules.production,
        storage = ?config.rules.storage,
        sweep_interval_secs = config.sweep_interval_secs,
        "Configuration loaded"
    );

    let db_pool = establish_connection_pool().await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));
    let worker = Arc::new(EconomyWorker::new(app_bus.clone()));

    Ok((config, app_bus, worker))
}
