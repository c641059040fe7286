use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::{ApiJson, ApiQuery};
use crate::db::{GameSession, NewGameSession, SessionOutcome};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub user_id: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_sessions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SessionListQuery>,
) -> Result<Json<Vec<GameSession>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let sessions = state.repo.list_game_sessions(query.user_id, limit).await?;
    Ok(Json(sessions))
}

pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewGameSession>,
) -> Result<(StatusCode, Json<GameSession>), AppError> {
    if req.match_id.trim().is_empty() {
        return Err(AppError::Validation("match_id must not be empty".into()));
    }

    let session = state.repo.create_game_session(&req).await?;
    tracing::info!(
        "🎮 [SESSIONS] session {} opened for match {}",
        session.id,
        session.match_id
    );
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GameSession>, AppError> {
    let session = state
        .repo
        .get_game_session(id)
        .await?
        .ok_or(AppError::NotFound("Game session"))?;
    Ok(Json(session))
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(outcome): ApiJson<SessionOutcome>,
) -> Result<Json<GameSession>, AppError> {
    let session = state
        .repo
        .close_game_session(id, &outcome)
        .await?
        .ok_or(AppError::NotFound("Game session"))?;
    Ok(Json(session))
}
