use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    /// Game name part of the Riot ID.
    pub riot_id: String,
    pub summoner_name: String,
    pub tag_line: String,
    pub region: String,
    pub puuid: Option<String>,
    pub rank_tier: Option<String>,
    pub rank_division: Option<String>,
    pub league_points: i64,
    /// JSON array of champion names.
    pub preferred_jungle_champions: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_riot_id(&self) -> String {
        format!("{}#{}", self.riot_id, self.tag_line)
    }

    /// Decoded champion list; a malformed column reads as empty.
    pub fn preferred_champions(&self) -> Vec<String> {
        self.preferred_jungle_champions
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub riot_id: String,
    pub tag_line: String,
    pub region: String,
    pub puuid: Option<String>,
    pub rank_tier: Option<String>,
    pub rank_division: Option<String>,
    pub league_points: i64,
    pub preferred_jungle_champions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GameSession {
    pub id: i64,
    pub user_id: i64,
    pub match_id: String,
    pub champion_name: String,
    pub game_mode: String,
    /// Seconds.
    pub game_duration: Option<i64>,
    pub won: Option<bool>,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs_score: i64,
    pub jungle_cs: i64,
    pub vision_score: i64,
    pub objectives_secured: Option<String>,
    pub ai_suggestions: Option<String>,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGameSession {
    pub user_id: i64,
    pub match_id: String,
    pub champion_name: String,
    #[serde(default = "default_game_mode")]
    pub game_mode: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to now.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

fn default_game_mode() -> String {
    "CLASSIC".to_string()
}

/// Final stats written when a session is closed. Missing numbers stay as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionOutcome {
    #[serde(default)]
    pub won: Option<bool>,
    #[serde(default)]
    pub game_duration: Option<i64>,
    #[serde(default)]
    pub kills: Option<i64>,
    #[serde(default)]
    pub deaths: Option<i64>,
    #[serde(default)]
    pub assists: Option<i64>,
    #[serde(default)]
    pub cs_score: Option<i64>,
    #[serde(default)]
    pub jungle_cs: Option<i64>,
    #[serde(default)]
    pub vision_score: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JungleTimer {
    pub id: i64,
    pub game_session_id: i64,
    pub objective_type: String,
    pub objective_name: String,
    pub spawn_time: DateTime<Utc>,
    pub respawn_time: DateTime<Utc>,
    pub is_secured: bool,
    pub secured_by_team: Option<String>,
    pub game_time_minutes: i64,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJungleTimer {
    pub game_session_id: i64,
    pub objective_type: String,
    pub objective_name: String,
    pub spawn_time: DateTime<Utc>,
    pub respawn_time: DateTime<Utc>,
    pub game_time_minutes: i64,
    pub notes: Option<String>,
}
