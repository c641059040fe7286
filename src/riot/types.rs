use serde::{Deserialize, Serialize};

pub const RANKED_SOLO_QUEUE_TYPE: &str = "RANKED_SOLO_5x5";
pub const RANKED_SOLO_QUEUE_ID: u16 = 420;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, scoped to the platform it was fetched from.
    pub id: String,
    pub puuid: String,
    pub summoner_level: i64,
    pub profile_icon_id: i32,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl LeagueEntryDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == RANKED_SOLO_QUEUE_TYPE
    }
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub info: InfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    #[serde(default)]
    pub game_duration: u64,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

impl MatchDto {
    pub fn participant_info_of(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn duration_minutes(&self) -> u64 {
        self.info.game_duration / 60
    }
}

/// Only the participant fields the analysis needs; Riot sends many more.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub team_position: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub vision_score: u32,
    pub dragon_kills: u32,
    pub baron_kills: u32,
    pub champ_level: u32,
    pub objectives_stolen: u32,
}

// ============================================================================
// Spectator-v4
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameInfo {
    pub game_id: i64,
    #[serde(default)]
    pub game_mode: String,
    /// Seconds since the game started.
    #[serde(default)]
    pub game_length: i64,
    #[serde(default)]
    pub participants: Vec<CurrentGameParticipant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameParticipant {
    #[serde(default)]
    pub puuid: Option<String>,
    pub champion_id: i64,
    pub team_id: i64,
    #[serde(default)]
    pub spell1_id: i64,
    #[serde(default)]
    pub spell2_id: i64,
}
