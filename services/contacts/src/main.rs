use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{self, DatabaseConfig};
use contacts::{AppState, MIGRATOR, config::ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting contact book service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool, &MIGRATOR).await?;

    let server_config = ServerConfig::load()?;
    let app = create_router(AppState::postgres(pool));

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Contact book service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
