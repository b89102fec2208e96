use std::sync::Arc;

use clinicsync_api::{ApiState, config::ApiConfig};
use clinicsync_core::payment::SimulatedGateway;
use clinicsync_db::{PgStore, create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let state = ApiState::new(
        Arc::new(PgStore::new(db_pool)),
        Arc::new(SimulatedGateway),
    );

    // Start API server
    clinicsync_api::start_server(config, state).await?;

    Ok(())
}
