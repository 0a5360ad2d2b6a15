use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kids_room_backend::config::AppConfig;
use kids_room_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env file is optional; real deployments use the
    // environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state);

    info!("Starting server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
