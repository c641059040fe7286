use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ApiJson;
use crate::assistant::{ChampionPreferences, GameState};
use crate::error::AppError;
use crate::riot::MatchDto;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchAnalysisRequest {
    pub match_data: MatchDto,
    pub puuid: String,
}

pub async fn analyze_game(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MatchAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    let analysis = state
        .assistant
        .review_performance(&req.match_data, &req.puuid)
        .await?
        .ok_or(AppError::AssistantUnavailable)?;

    Ok(Json(json!({
        "analysis": analysis,
        "puuid": req.puuid,
        "generated_at": Utc::now(),
    })))
}

pub async fn jungle_suggestions(
    State(state): State<AppState>,
    ApiJson(game_state): ApiJson<GameState>,
) -> Result<Json<Value>, AppError> {
    let suggestions = state
        .assistant
        .realtime_suggestions(&game_state)
        .await
        .ok_or(AppError::AssistantUnavailable)?;

    Ok(Json(json!({
        "suggestions": suggestions,
        "game_time": game_state.game_time,
        "generated_at": Utc::now(),
    })))
}

pub async fn champion_recommendations(
    State(state): State<AppState>,
    ApiJson(prefs): ApiJson<ChampionPreferences>,
) -> Result<Json<Value>, AppError> {
    let recommendations = state
        .assistant
        .recommend_champions(&prefs)
        .await
        .ok_or(AppError::AssistantUnavailable)?;

    Ok(Json(json!({
        "recommendations": recommendations,
        "preferences": prefs,
        "generated_at": Utc::now(),
    })))
}

pub async fn analyze_pathing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<MatchAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    let analysis = state
        .assistant
        .analyze_pathing(&req.match_data, &req.puuid)
        .await?
        .ok_or(AppError::AssistantUnavailable)?;

    Ok(Json(json!({
        "pathing_analysis": analysis,
        "puuid": req.puuid,
        "generated_at": Utc::now(),
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::routes::test_support::{post_json, test_app};

    fn match_payload() -> serde_json::Value {
        json!({
            "metadata": {"matchId": "LA2_1"},
            "info": {
                "gameDuration": 1500,
                "participants": [
                    {"puuid": "me", "championName": "Kindred", "teamPosition": "JUNGLE",
                     "win": false, "kills": 3, "deaths": 5, "assists": 7,
                     "neutralMinionsKilled": 150, "champLevel": 14}
                ]
            }
        })
    }

    async fn mock_reply(server: &MockServer, text: &str) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(200).json_body(json!({
                    "content": [{"type": "text", "text": text}]
                }));
            })
            .await;
    }

    #[tokio::test]
    async fn analyze_game_returns_assistant_text() {
        let server = MockServer::start_async().await;
        mock_reply(&server, "Solid vision, die less.").await;
        let (app, _) = test_app(&server).await;

        let (status, body) = post_json(
            app,
            "/api/v1/ai/analyze-game",
            json!({"match_data": match_payload(), "puuid": "me"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"], "Solid vision, die less.");
    }

    #[tokio::test]
    async fn analyze_game_unknown_puuid_is_404() {
        let server = MockServer::start_async().await;
        let (app, _) = test_app(&server).await;

        let (status, body) = post_json(
            app,
            "/api/v1/ai/analyze-pathing",
            json!({"match_data": match_payload(), "puuid": "someone-else"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn assistant_failure_is_503() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(500).body("internal");
            })
            .await;
        let (app, _) = test_app(&server).await;

        let (status, body) = post_json(
            app,
            "/api/v1/ai/champion-recommendations",
            json!({"playstyle": "farming", "favorite_champions": ["Graves"]}),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "assistant_unavailable");
    }

    #[tokio::test]
    async fn invalid_team_state_is_422() {
        let server = MockServer::start_async().await;
        let (app, _) = test_app(&server).await;

        let (status, body) = post_json(
            app,
            "/api/v1/ai/jungle-suggestions",
            json!({"champion": "Graves", "team_state": "winning"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_failed");
    }

    #[tokio::test]
    async fn jungle_suggestions_echo_game_time() {
        let server = MockServer::start_async().await;
        mock_reply(&server, "1. Drake 2. Ward 3. Back").await;
        let (app, _) = test_app(&server).await;

        let (status, body) = post_json(
            app,
            "/api/v1/ai/jungle-suggestions",
            json!({"champion": "Graves", "game_time": 14, "team_state": "ahead"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["game_time"], 14);
        assert_eq!(body["suggestions"], "1. Drake 2. Ward 3. Back");
    }
}
