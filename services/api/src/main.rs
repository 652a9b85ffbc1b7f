use anyhow::Result;
use aws_config::BehaviorVersion;
use std::env;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use api::{routes, state::AppState};
use common::database::{DatabaseConfig, health_check, init_pool};
use media::{MediaStore, MediaStoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    health_check(&pool).await?;
    info!("Database connection successful");

    // Apply pending schema migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Initialize the S3-backed media store
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let media_store = MediaStore::new(s3_client, MediaStoreConfig::from_env());

    let app_state = AppState::new(pool, media_store);

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
