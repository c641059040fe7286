use serde::Serialize;
use tracing::warn;

use crate::error::AppError;

use super::{
    client::RiotClient,
    region::Routing,
    types::{AccountDto, LeagueEntryDto, RANKED_SOLO_QUEUE_ID, SummonerDto},
};

pub const DEFAULT_MATCH_COUNT: u32 = 20;

/// Solo queue standing with a win rate that is safe for zero games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankSummary {
    pub tier: String,
    pub rank: String,
    #[serde(rename = "leaguePoints")]
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage, rounded to one decimal.
    pub winrate: f64,
}

impl RankSummary {
    /// Picks the ranked solo entry, if the player has one.
    pub fn from_entries(entries: &[LeagueEntryDto]) -> Option<Self> {
        entries
            .iter()
            .find(|entry| entry.is_solo_queue())
            .map(|entry| Self {
                tier: entry.tier.clone(),
                rank: entry.rank.clone(),
                league_points: entry.league_points,
                wins: entry.wins,
                losses: entry.losses,
                winrate: winrate(entry.wins, entry.losses),
            })
    }
}

pub fn winrate(wins: u32, losses: u32) -> f64 {
    let games = (u64::from(wins) + u64::from(losses)).max(1);
    let pct = u64::from(wins) as f64 / games as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Everything we know about a player after one aggregation pass.
#[derive(Debug, Clone, Serialize)]
pub struct SummonerAggregate {
    pub account: AccountDto,
    pub summoner: SummonerDto,
    pub leagues: Vec<LeagueEntryDto>,
    pub rank: Option<RankSummary>,
    pub recent_match_ids: Vec<String>,
}

impl RiotClient {
    /// Chain account, summoner, league and match-id lookups into one record.
    ///
    /// The account and summoner are required: if either is absent the whole
    /// call is `NotFound`. League entries and match ids are optional and
    /// degrade to empty lists on absence or upstream failure.
    pub async fn get_complete_summoner(
        &self,
        game_name: &str,
        tag_line: &str,
        region_code: &str,
        match_count: u32,
    ) -> Result<SummonerAggregate, AppError> {
        let routing = Routing::resolve(region_code);
        tracing::debug!(
            "[RIOT::SUMMARY] {}#{} through {}",
            game_name,
            tag_line,
            routing
        );

        let account = self
            .require_account_by_riot_id(routing.region, game_name, tag_line)
            .await?;

        let summoner = self
            .get_summoner_by_puuid(routing.platform, &account.puuid)
            .await?
            .ok_or(AppError::NotFound("Summoner"))?;

        let leagues = match self
            .get_league_entries(routing.platform, &summoner.id)
            .await
        {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!("⚠️ [RIOT::SUMMARY] league lookup failed, using no rank: {}", e);
                Vec::new()
            }
        };

        let recent_match_ids = match self
            .get_match_ids(
                routing.region,
                &account.puuid,
                match_count,
                Some(RANKED_SOLO_QUEUE_ID),
            )
            .await
        {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!("⚠️ [RIOT::SUMMARY] match ids lookup failed, using none: {}", e);
                Vec::new()
            }
        };

        let rank = RankSummary::from_entries(&leagues);

        Ok(SummonerAggregate {
            account,
            summoner,
            leagues,
            rank,
            recent_match_ids,
        })
    }
}
