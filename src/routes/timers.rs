use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::{ApiJson, ApiQuery};
use crate::db::JungleTimer;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TimerListQuery {
    pub session_id: i64,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SecureTimerRequest {
    /// "blue" or "red".
    #[serde(default)]
    pub team: Option<String>,
}

pub async fn list_timers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TimerListQuery>,
) -> Result<Json<Vec<JungleTimer>>, AppError> {
    if state.repo.get_game_session(query.session_id).await?.is_none() {
        return Err(AppError::NotFound("Game session"));
    }
    let timers = state
        .repo
        .list_timers(query.session_id, query.active_only)
        .await?;
    Ok(Json(timers))
}

pub async fn get_timer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<JungleTimer>, AppError> {
    let timer = state
        .repo
        .get_timer(id)
        .await?
        .ok_or(AppError::NotFound("Timer"))?;
    Ok(Json(timer))
}

pub async fn secure_timer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<SecureTimerRequest>,
) -> Result<Json<JungleTimer>, AppError> {
    let timer = state
        .repo
        .secure_timer(id, req.team.as_deref())
        .await?
        .ok_or(AppError::NotFound("Timer"))?;
    Ok(Json(timer))
}

pub async fn delete_timer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.repo.delete_timer(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Timer"))
    }
}
