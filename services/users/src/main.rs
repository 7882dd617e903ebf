use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use users::{
    config::{ServiceConfig, StorageBackend},
    repositories::{InMemoryUserRepository, MIGRATOR, PgUserRepository},
    routes::create_router,
    service::UserService,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting users service");

    let config = ServiceConfig::from_env()?;

    let app: Router = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            run_migrations(&pool, &MIGRATOR).await?;

            let service = UserService::new(PgUserRepository::new(pool));
            create_router(AppState::new(service))
        }
        StorageBackend::Memory => {
            info!("Using in-memory user storage");
            let service = UserService::new(InMemoryUserRepository::new());
            create_router(AppState::new(service))
        }
    };

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Users service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Users service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
