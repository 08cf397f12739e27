pub mod position_repo;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::AppConfig;

/// Open the positions database. Plain file paths are opened read-only; a
/// full `sqlite:` DSN is used as given.
pub async fn init_pool(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = if config.db_path.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(&config.db_path)?
    } else {
        SqliteConnectOptions::new()
            .filename(&config.db_path)
            .read_only(true)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
