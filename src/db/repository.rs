use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{
    GameSession, JungleTimer, NewGameSession, NewJungleTimer, NewUser, SessionOutcome, User,
};
use crate::error::AppError;

const USER_COLUMN_NAMES: [&str; 13] = [
    "id",
    "riot_id",
    "summoner_name",
    "tag_line",
    "region",
    "puuid",
    "rank_tier",
    "rank_division",
    "league_points",
    "preferred_jungle_champions",
    "is_active",
    "created_at",
    "updated_at",
];

const SESSION_COLUMNS: &str = "id, user_id, match_id, champion_name, game_mode, game_duration, \
     won, kills, deaths, assists, cs_score, jungle_cs, vision_score, objectives_secured, \
     ai_suggestions, notes, started_at, ended_at, created_at";

const TIMER_COLUMNS: &str = "id, game_session_id, objective_type, objective_name, spawn_time, \
     respawn_time, is_secured, secured_by_team, game_time_minutes, is_active, notes, created_at";

fn user_columns() -> String {
    USER_COLUMN_NAMES.join(", ")
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // === User operations ===

    /// Insert or refresh the user keyed by `riot_id`.
    pub async fn upsert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let columns = user_columns();
        let champions = serde_json::to_string(&user.preferred_jungle_champions)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let now = Utc::now();

        let query = format!(
            r#"
            INSERT INTO users (
                riot_id, summoner_name, tag_line, region, puuid,
                rank_tier, rank_division, league_points,
                preferred_jungle_champions, is_active, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?)
            ON CONFLICT(riot_id) DO UPDATE SET
                summoner_name = excluded.summoner_name,
                tag_line = excluded.tag_line,
                region = excluded.region,
                puuid = excluded.puuid,
                rank_tier = excluded.rank_tier,
                rank_division = excluded.rank_division,
                league_points = excluded.league_points,
                preferred_jungle_champions = excluded.preferred_jungle_champions,
                is_active = 1,
                updated_at = ?
            RETURNING {columns}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&user.riot_id)
            .bind(&user.riot_id)
            .bind(&user.tag_line)
            .bind(&user.region)
            .bind(&user.puuid)
            .bind(&user.rank_tier)
            .bind(&user.rank_division)
            .bind(user.league_points)
            .bind(champions)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_riot_id(&self, riot_id: &str) -> Result<Option<User>, AppError> {
        let columns = user_columns();
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {columns} FROM users WHERE LOWER(riot_id) = LOWER(?)"
        ))
        .bind(riot_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let columns = user_columns();
        let user = sqlx::query_as::<_, User>(&format!("SELECT {columns} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // === Game session operations ===

    pub async fn create_game_session(
        &self,
        session: &NewGameSession,
    ) -> Result<GameSession, AppError> {
        if self.get_user(session.user_id).await?.is_none() {
            return Err(AppError::NotFound("User"));
        }

        let now = Utc::now();
        let started_at = session.started_at.unwrap_or(now);

        let res = sqlx::query_as::<_, GameSession>(&format!(
            r#"
            INSERT INTO game_sessions (
                user_id, match_id, champion_name, game_mode, notes, started_at, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(session.user_id)
        .bind(&session.match_id)
        .bind(&session.champion_name)
        .bind(&session.game_mode)
        .bind(&session.notes)
        .bind(started_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(created) => Ok(created),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
                "a session for match {} already exists",
                session.match_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recent first, optionally restricted to one user.
    pub async fn list_game_sessions(
        &self,
        user_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<GameSession>, AppError> {
        let sessions = sqlx::query_as::<_, GameSession>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM game_sessions
            WHERE (?1 IS NULL OR user_id = ?1)
            ORDER BY started_at DESC, id DESC
            LIMIT ?2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    pub async fn get_game_session(&self, id: i64) -> Result<Option<GameSession>, AppError> {
        let session = sqlx::query_as::<_, GameSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM game_sessions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Stamp `ended_at` and record the outcome. Also deactivates the
    /// session's timers. `None` if the session does not exist.
    pub async fn close_game_session(
        &self,
        id: i64,
        outcome: &SessionOutcome,
    ) -> Result<Option<GameSession>, AppError> {
        let mut tx = self.pool.begin().await?;

        let session = sqlx::query_as::<_, GameSession>(&format!(
            r#"
            UPDATE game_sessions SET
                ended_at = ?,
                won = COALESCE(?, won),
                game_duration = COALESCE(?, game_duration),
                kills = COALESCE(?, kills),
                deaths = COALESCE(?, deaths),
                assists = COALESCE(?, assists),
                cs_score = COALESCE(?, cs_score),
                jungle_cs = COALESCE(?, jungle_cs),
                vision_score = COALESCE(?, vision_score),
                notes = COALESCE(?, notes)
            WHERE id = ?
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(Utc::now())
        .bind(outcome.won)
        .bind(outcome.game_duration)
        .bind(outcome.kills)
        .bind(outcome.deaths)
        .bind(outcome.assists)
        .bind(outcome.cs_score)
        .bind(outcome.jungle_cs)
        .bind(outcome.vision_score)
        .bind(&outcome.notes)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if session.is_some() {
            sqlx::query("UPDATE jungle_timers SET is_active = 0 WHERE game_session_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(session)
    }

    // === Jungle timer operations ===

    pub async fn create_timer(&self, timer: &NewJungleTimer) -> Result<JungleTimer, AppError> {
        let created = sqlx::query_as::<_, JungleTimer>(&format!(
            r#"
            INSERT INTO jungle_timers (
                game_session_id, objective_type, objective_name, spawn_time,
                respawn_time, game_time_minutes, is_active, notes, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING {TIMER_COLUMNS}
            "#
        ))
        .bind(timer.game_session_id)
        .bind(&timer.objective_type)
        .bind(&timer.objective_name)
        .bind(timer.spawn_time)
        .bind(timer.respawn_time)
        .bind(timer.game_time_minutes)
        .bind(&timer.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list_timers(
        &self,
        game_session_id: i64,
        active_only: bool,
    ) -> Result<Vec<JungleTimer>, AppError> {
        let timers = sqlx::query_as::<_, JungleTimer>(&format!(
            r#"
            SELECT {TIMER_COLUMNS}
            FROM jungle_timers
            WHERE game_session_id = ? AND (? = 0 OR is_active = 1)
            ORDER BY respawn_time ASC, id ASC
            "#
        ))
        .bind(game_session_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(timers)
    }

    pub async fn get_timer(&self, id: i64) -> Result<Option<JungleTimer>, AppError> {
        let timer = sqlx::query_as::<_, JungleTimer>(&format!(
            "SELECT {TIMER_COLUMNS} FROM jungle_timers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(timer)
    }

    /// Mark the objective as taken and stop tracking it.
    pub async fn secure_timer(
        &self,
        id: i64,
        team: Option<&str>,
    ) -> Result<Option<JungleTimer>, AppError> {
        let timer = sqlx::query_as::<_, JungleTimer>(&format!(
            r#"
            UPDATE jungle_timers
            SET is_secured = 1, secured_by_team = ?, is_active = 0
            WHERE id = ?
            RETURNING {TIMER_COLUMNS}
            "#
        ))
        .bind(team)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(timer)
    }

    /// Returns whether a row was removed.
    pub async fn delete_timer(&self, id: i64) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM jungle_timers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone};

    use super::*;
    use crate::db::test_pool;

    fn new_user(riot_id: &str) -> NewUser {
        NewUser {
            riot_id: riot_id.to_string(),
            tag_line: "JCP".to_string(),
            region: "las".to_string(),
            puuid: Some("puuid-1".to_string()),
            rank_tier: Some("PLATINUM".to_string()),
            rank_division: Some("IV".to_string()),
            league_points: 91,
            preferred_jungle_champions: vec!["Graves".into(), "Kha'Zix".into()],
        }
    }

    fn new_session(user_id: i64, match_id: &str) -> NewGameSession {
        NewGameSession {
            user_id,
            match_id: match_id.to_string(),
            champion_name: "Graves".to_string(),
            game_mode: "CLASSIC".to_string(),
            notes: None,
            started_at: Some(Utc.with_ymd_and_hms(2024, 11, 20, 20, 0, 0).unwrap()),
        }
    }

    fn new_timer(session_id: i64, spawn: DateTime<Utc>) -> NewJungleTimer {
        NewJungleTimer {
            game_session_id: session_id,
            objective_type: "dragon".to_string(),
            objective_name: "Ocean Dragon".to_string(),
            spawn_time: spawn,
            respawn_time: spawn + Duration::seconds(300),
            game_time_minutes: 5,
            notes: None,
        }
    }

    #[tokio::test]
    async fn upsert_user_inserts_then_updates() {
        let repo = Repository::new(test_pool().await);

        let created = repo.upsert_user(&new_user("Not Alet")).await.unwrap();
        assert_eq!(created.full_riot_id(), "Not Alet#JCP");
        assert_eq!(created.preferred_champions(), vec!["Graves", "Kha'Zix"]);
        assert!(created.updated_at.is_none());

        let mut changed = new_user("Not Alet");
        changed.league_points = 12;
        changed.rank_tier = Some("EMERALD".into());
        let updated = repo.upsert_user(&changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.league_points, 12);
        assert_eq!(updated.rank_tier.as_deref(), Some("EMERALD"));
        assert!(updated.updated_at.is_some());

        let found = repo.get_user_by_riot_id("not alet").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_user_by_riot_id("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_requires_existing_user_and_unique_match() {
        let repo = Repository::new(test_pool().await);

        let missing = repo.create_game_session(&new_session(42, "LA2_1")).await;
        assert!(matches!(missing, Err(AppError::NotFound("User"))));

        let user = repo.upsert_user(&new_user("Not Alet")).await.unwrap();
        let session = repo
            .create_game_session(&new_session(user.id, "LA2_1"))
            .await
            .unwrap();
        assert!(session.is_open());
        assert_eq!(session.game_mode, "CLASSIC");

        let dup = repo.create_game_session(&new_session(user.id, "LA2_1")).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn list_sessions_filters_and_orders() {
        let repo = Repository::new(test_pool().await);
        let a = repo.upsert_user(&new_user("A")).await.unwrap();
        let b = repo.upsert_user(&new_user("B")).await.unwrap();

        let mut early = new_session(a.id, "LA2_1");
        early.started_at = Some(Utc.with_ymd_and_hms(2024, 11, 19, 20, 0, 0).unwrap());
        repo.create_game_session(&early).await.unwrap();
        repo.create_game_session(&new_session(a.id, "LA2_2")).await.unwrap();
        repo.create_game_session(&new_session(b.id, "LA2_3")).await.unwrap();

        let all = repo.list_game_sessions(None, 50).await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = repo.list_game_sessions(Some(a.id), 50).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].match_id, "LA2_2");

        let limited = repo.list_game_sessions(None, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn closing_a_session_records_outcome_and_stops_timers() {
        let repo = Repository::new(test_pool().await);
        let user = repo.upsert_user(&new_user("Not Alet")).await.unwrap();
        let session = repo
            .create_game_session(&new_session(user.id, "LA2_1"))
            .await
            .unwrap();
        let timer = repo
            .create_timer(&new_timer(session.id, session.started_at))
            .await
            .unwrap();

        let outcome = SessionOutcome {
            won: Some(true),
            kills: Some(9),
            ..SessionOutcome::default()
        };
        let closed = repo
            .close_game_session(session.id, &outcome)
            .await
            .unwrap()
            .unwrap();

        assert!(!closed.is_open());
        assert_eq!(closed.won, Some(true));
        assert_eq!(closed.kills, 9);
        assert_eq!(closed.deaths, 0);

        let timer = repo.get_timer(timer.id).await.unwrap().unwrap();
        assert!(!timer.is_active);

        let none = repo.close_game_session(999, &outcome).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn timers_round_trip_exact_times() {
        let repo = Repository::new(test_pool().await);
        let user = repo.upsert_user(&new_user("Not Alet")).await.unwrap();
        let session = repo
            .create_game_session(&new_session(user.id, "LA2_1"))
            .await
            .unwrap();

        let spawn = session.started_at + Duration::seconds(305);
        let created = repo.create_timer(&new_timer(session.id, spawn)).await.unwrap();

        assert_eq!(created.spawn_time, spawn);
        assert_eq!(created.respawn_time - created.spawn_time, Duration::seconds(300));
        assert!(created.is_active);
        assert!(!created.is_secured);
    }

    #[tokio::test]
    async fn timer_secure_list_and_delete() {
        let repo = Repository::new(test_pool().await);
        let user = repo.upsert_user(&new_user("Not Alet")).await.unwrap();
        let session = repo
            .create_game_session(&new_session(user.id, "LA2_1"))
            .await
            .unwrap();

        let first = repo
            .create_timer(&new_timer(session.id, session.started_at))
            .await
            .unwrap();
        let second = repo
            .create_timer(&new_timer(
                session.id,
                session.started_at + Duration::seconds(60),
            ))
            .await
            .unwrap();

        let secured = repo
            .secure_timer(first.id, Some("blue"))
            .await
            .unwrap()
            .unwrap();
        assert!(secured.is_secured);
        assert!(!secured.is_active);
        assert_eq!(secured.secured_by_team.as_deref(), Some("blue"));

        let active = repo.list_timers(session.id, true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);

        let all = repo.list_timers(session.id, false).await.unwrap();
        assert_eq!(all.len(), 2);

        assert!(repo.delete_timer(second.id).await.unwrap());
        assert!(!repo.delete_timer(second.id).await.unwrap());
        assert!(repo.secure_timer(second.id, None).await.unwrap().is_none());
    }
}
