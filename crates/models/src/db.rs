use migration::MigratorTrait;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use tokio::sync::OnceCell;
use tracing::info;

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/films.db?mode=rwc".to_string())
});

static SHARED: OnceCell<DatabaseConnection> = OnceCell::const_new();

/// Open a new connection using the process-wide database URL.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    connect_to(DATABASE_URL.as_str()).await
}

/// Open a connection to an explicit URL. The store is single-writer, so the
/// pool is capped at one connection.
pub async fn connect_to(url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Open a connection using an explicit database config section.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.as_str());
    opts.max_connections(cfg.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Process-wide connection, established on first access. The schema is
/// created on that first access if absent. Callers arriving while the first
/// initialization is in flight await the same attempt instead of opening a
/// second connection.
pub async fn shared() -> anyhow::Result<&'static DatabaseConnection> {
    SHARED
        .get_or_try_init(|| async {
            let db = connect().await?;
            migration::Migrator::up(&db, None).await?;
            info!(url = %DATABASE_URL.as_str(), "database connected and migrated");
            Ok(db)
        })
        .await
}
