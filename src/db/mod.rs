use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::error::AppError;

pub mod migrations;
pub mod models;
pub mod repository;

pub use migrations::run_migrations;
pub use models::{
    GameSession, JungleTimer, NewGameSession, NewJungleTimer, NewUser, SessionOutcome, User,
};
pub use repository::Repository;

const MAX_CONNECTIONS: u32 = 5;

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    info!("🗄️ Connected to {}", database_url);
    Ok(pool)
}

/// Fresh in-memory database with the schema applied. A single connection,
/// every extra one would see its own empty database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
