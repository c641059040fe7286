use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    riot_id TEXT UNIQUE NOT NULL,
    summoner_name TEXT NOT NULL,
    tag_line TEXT NOT NULL,
    region TEXT NOT NULL DEFAULT 'las',
    puuid TEXT,
    rank_tier TEXT,
    rank_division TEXT,
    league_points INTEGER NOT NULL DEFAULT 0,
    preferred_jungle_champions TEXT,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS game_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    match_id TEXT UNIQUE NOT NULL,
    champion_name TEXT NOT NULL,
    game_mode TEXT NOT NULL DEFAULT 'CLASSIC',
    game_duration INTEGER,
    won BOOLEAN,
    kills INTEGER NOT NULL DEFAULT 0,
    deaths INTEGER NOT NULL DEFAULT 0,
    assists INTEGER NOT NULL DEFAULT 0,
    cs_score INTEGER NOT NULL DEFAULT 0,
    jungle_cs INTEGER NOT NULL DEFAULT 0,
    vision_score INTEGER NOT NULL DEFAULT 0,
    objectives_secured TEXT,
    ai_suggestions TEXT,
    notes TEXT,
    started_at TEXT NOT NULL,
    ended_at TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS jungle_timers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_session_id INTEGER NOT NULL,
    objective_type TEXT NOT NULL,
    objective_name TEXT NOT NULL,
    spawn_time TEXT NOT NULL,
    respawn_time TEXT NOT NULL,
    is_secured BOOLEAN NOT NULL DEFAULT 0,
    secured_by_team TEXT,
    game_time_minutes INTEGER NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    notes TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (game_session_id) REFERENCES game_sessions(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_users_riot_id ON users(riot_id);
CREATE INDEX IF NOT EXISTS idx_game_sessions_user ON game_sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_jungle_timers_session ON jungle_timers(game_session_id);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, ["game_sessions", "jungle_timers", "users"]);
    }
}
