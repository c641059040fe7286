use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiQuery, RegionQuery};
use crate::error::AppError;
use crate::riot::{
    AccountDto, DEFAULT_MATCH_COUNT, LeagueEntryDto, RANKED_SOLO_QUEUE_ID, RankSummary, Routing,
    SummonerAggregate, SummonerDto,
};
use crate::state::AppState;

const MAX_MATCH_COUNT: u32 = 100;
const RECENT_MATCH_IDS_SHOWN: usize = 10;

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub region: Option<String>,
    pub count: Option<u32>,
}

impl MatchListQuery {
    fn count(&self) -> Result<u32, AppError> {
        match self.count.unwrap_or(DEFAULT_MATCH_COUNT) {
            n @ 1..=MAX_MATCH_COUNT => Ok(n),
            n => Err(AppError::Validation(format!(
                "count must be between 1 and {MAX_MATCH_COUNT}, got {n}"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompleteSummonerResponse {
    pub riot_id: String,
    pub tag_line: String,
    pub puuid: String,
    pub summoner_level: i64,
    pub profile_icon_id: i32,
    pub rank: Option<RankSummary>,
    pub recent_matches_count: usize,
    pub recent_match_ids: Vec<String>,
}

impl CompleteSummonerResponse {
    fn new(aggregate: SummonerAggregate, riot_id: String, tag_line: String) -> Self {
        let SummonerAggregate {
            account,
            summoner,
            rank,
            recent_match_ids,
            ..
        } = aggregate;

        let recent_matches_count = recent_match_ids.len();

        Self {
            riot_id: account.game_name.unwrap_or(riot_id),
            tag_line: account.tag_line.unwrap_or(tag_line),
            puuid: account.puuid,
            summoner_level: summoner.summoner_level,
            profile_icon_id: summoner.profile_icon_id,
            rank,
            recent_matches_count,
            recent_match_ids: recent_match_ids
                .into_iter()
                .take(RECENT_MATCH_IDS_SHOWN)
                .collect(),
        }
    }
}

pub async fn get_summoner(
    State(state): State<AppState>,
    Path((riot_id, tag_line)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Result<Json<AccountDto>, AppError> {
    let routing = Routing::resolve(state.region_or_default(query.region.as_deref()));
    let account = state
        .riot
        .require_account_by_riot_id(routing.region, &riot_id, &tag_line)
        .await?;
    Ok(Json(account))
}

pub async fn get_summoner_by_puuid(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Result<Json<SummonerDto>, AppError> {
    let routing = Routing::resolve(state.region_or_default(query.region.as_deref()));
    let summoner = state
        .riot
        .get_summoner_by_puuid(routing.platform, &puuid)
        .await?
        .ok_or(AppError::NotFound("Summoner"))?;
    Ok(Json(summoner))
}

pub async fn get_complete_summoner(
    State(state): State<AppState>,
    Path((riot_id, tag_line)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<MatchListQuery>,
) -> Result<Json<CompleteSummonerResponse>, AppError> {
    let count = query.count()?;
    let region = state.region_or_default(query.region.as_deref());

    let aggregate = state
        .riot
        .get_complete_summoner(&riot_id, &tag_line, region, count)
        .await?;

    Ok(Json(CompleteSummonerResponse::new(
        aggregate, riot_id, tag_line,
    )))
}

pub async fn get_rank(
    State(state): State<AppState>,
    Path(summoner_id): Path<String>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Result<Json<Vec<LeagueEntryDto>>, AppError> {
    let routing = Routing::resolve(state.region_or_default(query.region.as_deref()));
    let entries = state
        .riot
        .get_league_entries(routing.platform, &summoner_id)
        .await?
        .ok_or(AppError::NotFound("Rank"))?;
    Ok(Json(entries))
}

pub async fn get_matches(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
    ApiQuery(query): ApiQuery<MatchListQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let count = query.count()?;
    let routing = Routing::resolve(state.region_or_default(query.region.as_deref()));
    let ids = state
        .riot
        .get_match_ids(routing.region, &puuid, count, Some(RANKED_SOLO_QUEUE_ID))
        .await?
        .ok_or(AppError::NotFound("Matches"))?;
    Ok(Json(ids))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    ApiQuery(query): ApiQuery<RegionQuery>,
) -> Result<Json<Value>, AppError> {
    let routing = Routing::resolve(state.region_or_default(query.region.as_deref()));
    let payload = state
        .riot
        .get_match(routing.region, &match_id)
        .await?
        .ok_or(AppError::NotFound("Match"))?;
    Ok(Json(payload))
}
