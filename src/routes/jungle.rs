use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ApiJson, ApiQuery, RegionQuery};
use crate::assistant::{GameState, TeamState};
use crate::db::NewJungleTimer;
use crate::error::AppError;
use crate::jungle::{STANDARD_TIMERS, TimerSchedule, basic_path, jungle_stats_for, objectives};
use crate::riot::LiveGameStatus;
use crate::state::AppState;

pub async fn objective_timers() -> Json<Value> {
    Json(json!({
        "timers": STANDARD_TIMERS,
        "season": objectives::SEASON,
        "patch": objectives::PATCH,
        "last_updated": Utc::now(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct StartTimerQuery {
    pub session_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ObjectiveTimerRequest {
    /// "dragon", "baron", "herald", "gromp", ...
    pub objective_type: String,
    pub objective_name: String,
    pub spawn_time: DateTime<Utc>,
    pub respawn_seconds: i64,
    /// "blue", "red" or "neutral".
    #[serde(default)]
    pub team_side: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn start_timer(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StartTimerQuery>,
    ApiJson(req): ApiJson<ObjectiveTimerRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state
        .repo
        .get_game_session(query.session_id)
        .await?
        .ok_or(AppError::NotFound("Game session"))?;

    let schedule = TimerSchedule::compute(req.spawn_time, req.respawn_seconds, session.started_at)?;

    let notes = match (req.notes, req.team_side) {
        (Some(notes), _) => Some(notes),
        (None, Some(side)) => Some(format!("side: {side}")),
        (None, None) => None,
    };

    let timer = state
        .repo
        .create_timer(&NewJungleTimer {
            game_session_id: session.id,
            objective_type: req.objective_type,
            objective_name: req.objective_name,
            spawn_time: req.spawn_time,
            respawn_time: schedule.respawn_time,
            game_time_minutes: schedule.game_time_minutes,
            notes,
        })
        .await?;

    tracing::info!(
        "⏱️ [JUNGLE] timer {} started for {} in session {}",
        timer.id,
        timer.objective_name,
        session.id
    );

    Ok(Json(json!({
        "message": format!("Timer started for {}", timer.objective_name),
        "respawn_at": schedule.respawn_time,
        "timer": timer,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PathSuggestionQuery {
    pub champion: String,
    #[serde(default)]
    pub game_time: u32,
    #[serde(default)]
    pub enemy_jungle: Option<String>,
    #[serde(default)]
    pub team_state: TeamState,
}

/// Assistant advice when available, the canned path otherwise. Never fails
/// because of the assistant.
pub async fn jungle_path_suggestions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PathSuggestionQuery>,
) -> Json<Value> {
    let context = json!({
        "champion": query.champion,
        "enemy_jungle": query.enemy_jungle,
        "game_time": query.game_time,
        "team_state": query.team_state,
    });

    let game_state = GameState {
        game_time: query.game_time,
        champion: query.champion.clone(),
        level: 1,
        gold: 0,
        available_objectives: Vec::new(),
        team_state: query.team_state,
        enemy_jungle: query.enemy_jungle.clone(),
    };

    match state.assistant.realtime_suggestions(&game_state).await {
        Some(suggestions) => Json(json!({
            "suggestions": suggestions,
            "source": "assistant",
            "context": context,
            "generated_at": Utc::now(),
        })),
        None => {
            let path = basic_path(&query.champion, query.game_time);
            Json(json!({
                "suggestions": path.text,
                "phase": path.phase,
                "source": "basic_algorithm",
                "context": context,
            }))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LiveGameResponse {
    #[serde(flatten)]
    pub status: LiveGameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_started: Option<DateTime<Utc>>,
}

pub async fn live_game(
    State(state): State<AppState>,
    Path((riot_id, tag_line)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Result<Json<LiveGameResponse>, AppError> {
    let region = state.region_or_default(query.region.as_deref());
    let status = state.riot.track_live_game(&riot_id, &tag_line, region).await?;

    let (message, tracking_started) = if status.in_game() {
        (None, Some(Utc::now()))
    } else {
        (Some("No active game"), None)
    };

    Ok(Json(LiveGameResponse {
        status,
        message,
        tracking_started,
    }))
}

pub async fn champion_stats(
    State(state): State<AppState>,
    Path(champion_name): Path<String>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Json<Value> {
    let stats = jungle_stats_for(&champion_name);
    let region = state.region_or_default(query.region.as_deref());

    Json(json!({
        "champion": champion_name,
        "jungle_stats": stats,
        "known": stats.is_known(),
        "region": region,
        "last_updated": Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::{Duration, TimeZone};
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::db::{NewGameSession, NewUser};
    use crate::routes::test_support::{get_json, post_json, test_app};

    async fn seed_session(state: &AppState, started_at: DateTime<Utc>) -> i64 {
        let user = state
            .repo
            .upsert_user(&NewUser {
                riot_id: "Not Alet".into(),
                tag_line: "JCP".into(),
                region: "las".into(),
                puuid: None,
                rank_tier: None,
                rank_division: None,
                league_points: 0,
                preferred_jungle_champions: vec![],
            })
            .await
            .unwrap();
        state
            .repo
            .create_game_session(&NewGameSession {
                user_id: user.id,
                match_id: "LA2_1".into(),
                champion_name: "Graves".into(),
                game_mode: "CLASSIC".into(),
                notes: None,
                started_at: Some(started_at),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn objective_timers_lists_standard_table() {
        let server = MockServer::start_async().await;
        let (app, _) = test_app(&server).await;

        let (status, body) = get_json(app, "/api/v1/jungle/objectives-timers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timers"]["baron"]["first_spawn"], 1200);
        assert_eq!(body["season"], "14");
        assert_eq!(body["patch"], "14.24");
    }

    #[tokio::test]
    async fn start_timer_persists_derived_times() {
        let server = MockServer::start_async().await;
        let (app, state) = test_app(&server).await;
        let started = Utc.with_ymd_and_hms(2024, 11, 20, 20, 0, 0).unwrap();
        let session_id = seed_session(&state, started).await;
        let spawn = started + Duration::seconds(330);

        let (status, body) = post_json(
            app,
            &format!("/api/v1/jungle/start-timer?session_id={session_id}"),
            json!({
                "objective_type": "dragon",
                "objective_name": "Ocean Dragon",
                "spawn_time": spawn,
                "respawn_seconds": 300,
                "team_side": "neutral"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["game_time_minutes"], 5);
        assert!(body["timer"]["is_active"].as_bool().unwrap());

        let stored = state
            .repo
            .list_timers(session_id, true)
            .await
            .unwrap()
            .remove(0);
        assert_eq!(stored.respawn_time, spawn + Duration::seconds(300));
        assert_eq!(stored.game_time_minutes, 5);
    }

    #[tokio::test]
    async fn start_timer_for_unknown_session_is_404() {
        let server = MockServer::start_async().await;
        let (app, _) = test_app(&server).await;

        let (status, _) = post_json(
            app,
            "/api/v1/jungle/start-timer?session_id=77",
            json!({
                "objective_type": "baron",
                "objective_name": "Baron Nashor",
                "spawn_time": "2024-11-20T20:20:00Z",
                "respawn_seconds": 360
            }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn start_timer_rejects_negative_respawn() {
        let server = MockServer::start_async().await;
        let (app, state) = test_app(&server).await;
        let session_id = seed_session(&state, Utc::now()).await;

        let (status, body) = post_json(
            app,
            &format!("/api/v1/jungle/start-timer?session_id={session_id}"),
            json!({
                "objective_type": "gromp",
                "objective_name": "Gromp",
                "spawn_time": Utc::now(),
                "respawn_seconds": -5
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_failed");
    }

    #[tokio::test]
    async fn path_suggestions_fall_back_when_assistant_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(503);
            })
            .await;
        let (app, _) = test_app(&server).await;

        let (status, body) = get_json(
            app,
            "/api/v1/jungle/jungle-path-suggestions?champion=Graves&game_time=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "basic_algorithm");
        assert_eq!(body["phase"], "early");
        assert!(body["suggestions"].as_str().unwrap().contains("Graves"));
        assert_eq!(body["context"]["team_state"], "even");
    }

    #[tokio::test]
    async fn path_suggestions_prefer_assistant() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages").body_contains("Enemy jungler: Lee Sin");
                then.status(200)
                    .json_body(json!({"content": [{"type": "text", "text": "Invade topside"}]}));
            })
            .await;
        let (app, _) = test_app(&server).await;

        let (status, body) = get_json(
            app,
            "/api/v1/jungle/jungle-path-suggestions?champion=Kindred&game_time=20&enemy_jungle=Lee%20Sin&team_state=ahead",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "assistant");
        assert_eq!(body["suggestions"], "Invade topside");
    }

    #[tokio::test]
    async fn live_game_reports_idle_player() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/riot/account/");
                then.status(200).json_body(json!({"puuid": "p-1", "gameName": "Not Alet", "tagLine": "JCP"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/lol/summoner/");
                then.status(200).json_body(json!({"id": "s-1", "puuid": "p-1", "summonerLevel": 30, "profileIconId": 1}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/lol/spectator/");
                then.status(404);
            })
            .await;
        let (app, _) = test_app(&server).await;

        let (status, body) = get_json(app, "/api/v1/jungle/live-game/Not%20Alet/JCP").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["in_game"], false);
        assert_eq!(body["summoner"]["puuid"], "p-1");
        assert_eq!(body["message"], "No active game");
    }

    #[tokio::test]
    async fn champion_stats_normalizes_name() {
        let server = MockServer::start_async().await;
        let (app, _) = test_app(&server).await;

        let (status, body) = get_json(app.clone(), "/api/v1/jungle/champion-stats/Kha'Zix").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jungle_stats"]["optimal_runes"], "Dark Harvest");
        assert_eq!(body["region"], "las");

        let (_, body) = get_json(app, "/api/v1/jungle/champion-stats/Nidalee?region=euw").await;
        assert_eq!(body["known"], false);
        assert_eq!(body["jungle_stats"]["clear_speed"], "Unknown");
        assert_eq!(body["region"], "euw");
    }
}
