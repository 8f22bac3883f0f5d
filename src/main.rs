use biblioteca_mock::{
    api::{self, AppState},
    config::{self, database, seed},
    errors::Result,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(
        "Configuration loaded (status policy: {:?})",
        app_config.status_policy
    );

    // 4. Open the store and create its tables
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to open store: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Store initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed users and books
    let seed_config = seed::load_seed_or_default(app_config.seed_path.as_deref())?;
    seed::seed_database(&db, &seed_config)
        .await
        .inspect_err(|e| error!("Failed to seed store: {}", e))?;

    // 6. Serve until Ctrl+C
    let addr = app_config.bind_addr;
    let state = AppState::new(db, Arc::new(app_config));
    api::serve(addr, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
