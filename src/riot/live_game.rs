use serde::Serialize;

use crate::error::AppError;

use super::{
    client::RiotClient,
    region::Routing,
    types::{AccountDto, CurrentGameInfo, CurrentGameParticipant},
};

/// What the spectator API says about a player right now.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LiveGameStatus {
    Idle {
        in_game: bool,
        summoner: AccountDto,
    },
    Playing {
        in_game: bool,
        game_info: LiveGameInfo,
        player_info: Option<LivePlayerInfo>,
        game_time_minutes: i64,
    },
}

impl LiveGameStatus {
    pub fn in_game(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveGameInfo {
    #[serde(rename = "gameId")]
    pub game_id: i64,
    #[serde(rename = "gameMode")]
    pub game_mode: String,
    #[serde(rename = "gameLength")]
    pub game_length: i64,
    pub participants: Vec<LiveParticipant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveParticipant {
    #[serde(rename = "championId")]
    pub champion_id: i64,
    #[serde(rename = "teamId")]
    pub team_id: i64,
    /// Marks the tracked player; other PUUIDs are not exposed.
    pub is_player: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LivePlayerInfo {
    #[serde(rename = "championId")]
    pub champion_id: i64,
    #[serde(rename = "spell1Id")]
    pub spell1_id: i64,
    #[serde(rename = "spell2Id")]
    pub spell2_id: i64,
    #[serde(rename = "teamId")]
    pub team_id: i64,
}

impl LiveGameStatus {
    fn from_game(game: CurrentGameInfo, puuid: &str) -> Self {
        let is_player = |p: &CurrentGameParticipant| p.puuid.as_deref() == Some(puuid);

        let player_info = game
            .participants
            .iter()
            .find(|p| is_player(*p))
            .map(|p| LivePlayerInfo {
                champion_id: p.champion_id,
                spell1_id: p.spell1_id,
                spell2_id: p.spell2_id,
                team_id: p.team_id,
            });

        let participants = game
            .participants
            .iter()
            .map(|p| LiveParticipant {
                champion_id: p.champion_id,
                team_id: p.team_id,
                is_player: is_player(p),
            })
            .collect();

        Self::Playing {
            in_game: true,
            game_time_minutes: game.game_length.div_euclid(60),
            game_info: LiveGameInfo {
                game_id: game.game_id,
                game_mode: game.game_mode,
                game_length: game.game_length,
                participants,
            },
            player_info,
        }
    }
}

impl RiotClient {
    /// Resolve a Riot ID to its summoner and ask the spectator API whether
    /// it is in a game. A 404 from the spectator API is `Idle`, not an error.
    pub async fn track_live_game(
        &self,
        game_name: &str,
        tag_line: &str,
        region_code: &str,
    ) -> Result<LiveGameStatus, AppError> {
        let routing = Routing::resolve(region_code);

        let account = self
            .require_account_by_riot_id(routing.region, game_name, tag_line)
            .await?;

        let summoner = self
            .get_summoner_by_puuid(routing.platform, &account.puuid)
            .await?
            .ok_or(AppError::NotFound("Summoner details"))?;

        match self.get_active_game(routing.platform, &summoner.id).await? {
            Some(game) => Ok(LiveGameStatus::from_game(game, &account.puuid)),
            None => Ok(LiveGameStatus::Idle {
                in_game: false,
                summoner: account,
            }),
        }
    }
}
