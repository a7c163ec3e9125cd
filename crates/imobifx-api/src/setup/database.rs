//! Repository setup: PostgreSQL (with migrations) or in-memory

use anyhow::{Context, Result};
use imobifx_core::{Config, RepositoryBackend};
use imobifx_db::{AdsRepository, MemoryRepository, PgAdsRepository, PgQuotesRepository, QuotesRepository};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Both repositories, whatever backs them.
pub struct Repositories {
    pub ads: Arc<dyn AdsRepository>,
    pub quotes: Arc<dyn QuotesRepository>,
}

pub async fn setup_repositories(config: &Config) -> Result<Repositories> {
    match config.repository_backend {
        RepositoryBackend::Postgres => {
            let pool = setup_database(config).await?;
            Ok(Repositories {
                ads: Arc::new(PgAdsRepository::new(pool.clone())),
                quotes: Arc::new(PgQuotesRepository::new(pool)),
            })
        }
        RepositoryBackend::Memory => {
            tracing::warn!("Using in-memory repositories; data is lost on restart");
            let repo = Arc::new(MemoryRepository::new());
            Ok(Repositories {
                ads: repo.clone(),
                quotes: repo,
            })
        }
    }
}

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    // Run pending migrations on startup (path: workspace migrations/ from crate root)
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
