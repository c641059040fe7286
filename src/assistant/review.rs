//! Inputs to the assistant prompts: stats extracted from a finished match
//! and the ad-hoc game state and preference records sent by clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::riot::types::{MatchDto, ParticipantDto};

/// Locate the caller inside a match. A missing PUUID is `NotFound`, we never
/// fall back to another participant.
pub fn find_participant<'a>(
    match_data: &'a MatchDto,
    puuid: &str,
) -> Result<&'a ParticipantDto, AppError> {
    match_data
        .participant_info_of(puuid)
        .ok_or(AppError::NotFound("Participant"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReview {
    pub champion: String,
    pub position: String,
    pub won: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub jungle_cs: u32,
    pub vision_score: u32,
    pub duration_minutes: u64,
    pub dragons: u32,
    pub barons: u32,
}

impl MatchReview {
    pub fn from_match(match_data: &MatchDto, puuid: &str) -> Result<Self, AppError> {
        let p = find_participant(match_data, puuid)?;

        Ok(Self {
            champion: p.champion_name.clone(),
            position: p.team_position.clone(),
            won: p.win,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            cs: p.total_minions_killed,
            jungle_cs: p.neutral_minions_killed,
            vision_score: p.vision_score,
            duration_minutes: match_data.duration_minutes(),
            dragons: p.dragon_kills,
            barons: p.baron_kills,
        })
    }

    pub fn kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }

    pub fn outcome(&self) -> &'static str {
        if self.won { "Victory" } else { "Defeat" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathingReview {
    pub champion: String,
    pub jungle_cs: u32,
    pub jungle_cs_per_minute: f64,
    pub duration_minutes: u64,
    pub champion_level: u32,
}

impl PathingReview {
    pub fn from_match(match_data: &MatchDto, puuid: &str) -> Result<Self, AppError> {
        let p = find_participant(match_data, puuid)?;

        Ok(Self {
            champion: p.champion_name.clone(),
            jungle_cs: p.neutral_minions_killed,
            jungle_cs_per_minute: per_minute(p.neutral_minions_killed, match_data.info.game_duration),
            duration_minutes: match_data.duration_minutes(),
            champion_level: p.champ_level,
        })
    }
}

/// `value / (duration_secs / 60)`, zero for a zero-length game.
pub fn per_minute(value: u32, duration_secs: u64) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    f64::from(value) / (duration_secs as f64 / 60.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamState {
    Ahead,
    Behind,
    #[default]
    Even,
}

impl fmt::Display for TeamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Even => "even",
        })
    }
}

/// A snapshot of a game in progress, as reported by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Elapsed minutes.
    #[serde(default)]
    pub game_time: u32,
    pub champion: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub available_objectives: Vec<String>,
    #[serde(default)]
    pub team_state: TeamState,
    #[serde(default)]
    pub enemy_jungle: Option<String>,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playstyle {
    Aggressive,
    Farming,
    #[default]
    Balanced,
    Supportive,
}

impl fmt::Display for Playstyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aggressive => "aggressive (early ganks and invades)",
            Self::Farming => "farming (power farm and scale)",
            Self::Balanced => "balanced",
            Self::Supportive => "supportive (vision and objective control)",
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChampionPreferences {
    #[serde(default)]
    pub playstyle: Playstyle,
    #[serde(default)]
    pub favorite_champions: Vec<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub enemy_team: Option<Vec<String>>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::riot::types::InfoDto;

    pub(crate) fn sample_match() -> MatchDto {
        let me = ParticipantDto {
            puuid: "me".into(),
            champion_name: "Graves".into(),
            team_position: "JUNGLE".into(),
            win: true,
            kills: 8,
            deaths: 2,
            assists: 11,
            total_minions_killed: 40,
            neutral_minions_killed: 180,
            vision_score: 31,
            dragon_kills: 3,
            baron_kills: 1,
            champ_level: 16,
            objectives_stolen: 0,
        };
        let other = ParticipantDto {
            puuid: "other".into(),
            champion_name: "Ahri".into(),
            ..ParticipantDto::default()
        };

        MatchDto {
            info: InfoDto {
                game_duration: 1800,
                game_mode: Some("CLASSIC".into()),
                participants: vec![other, me],
            },
        }
    }

    #[test]
    fn match_review_extracts_the_callers_stats() {
        let review = MatchReview::from_match(&sample_match(), "me").unwrap();
        assert_eq!(review.champion, "Graves");
        assert_eq!(review.kda(), "8/2/11");
        assert_eq!(review.outcome(), "Victory");
        assert_eq!(review.jungle_cs, 180);
        assert_eq!(review.duration_minutes, 30);
        assert_eq!(review.dragons, 3);
    }

    #[test]
    fn missing_puuid_is_not_found() {
        let res = MatchReview::from_match(&sample_match(), "stranger");
        assert!(matches!(res, Err(AppError::NotFound("Participant"))));

        let res = PathingReview::from_match(&sample_match(), "stranger");
        assert!(matches!(res, Err(AppError::NotFound("Participant"))));
    }

    #[test]
    fn pathing_review_computes_cs_per_minute() {
        let review = PathingReview::from_match(&sample_match(), "me").unwrap();
        assert_eq!(review.jungle_cs_per_minute, 6.0);
        assert_eq!(review.champion_level, 16);
    }

    #[test]
    fn per_minute_guards_zero_duration() {
        assert_eq!(per_minute(120, 0), 0.0);
        assert_eq!(per_minute(90, 90), 60.0);
    }

    #[test]
    fn game_state_defaults_and_team_state_parsing() {
        let state: GameState =
            serde_json::from_str(r#"{"champion": "Kindred", "team_state": "behind"}"#).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.team_state, TeamState::Behind);
        assert!(state.available_objectives.is_empty());

        let bad = serde_json::from_str::<GameState>(r#"{"champion": "Kindred", "team_state": "winning"}"#);
        assert!(bad.is_err());
    }
}
