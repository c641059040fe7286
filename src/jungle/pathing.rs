use std::fmt;

use serde::Serialize;

const EARLY_GAME_END_MINUTES: u32 = 5;
const MID_GAME_END_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    pub fn from_minutes(minutes: u32) -> Self {
        if minutes <= EARLY_GAME_END_MINUTES {
            Self::Early
        } else if minutes <= MID_GAME_END_MINUTES {
            Self::Mid
        } else {
            Self::Late
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicPath {
    pub phase: GamePhase,
    pub text: String,
}

/// Canned pathing advice used when the assistant gives nothing back.
pub fn basic_path(champion: &str, minutes: u32) -> BasicPath {
    let phase = GamePhase::from_minutes(minutes);

    let text = match phase {
        GamePhase::Early => format!(
            "Early game with {champion}: start on your side's buff, clear the small camps, \
             then contest the Scuttle Crab at 3:15"
        ),
        GamePhase::Mid => format!(
            "Mid game: prioritise objectives and ganks. With {champion}, look for \
             counter-jungle opportunities"
        ),
        GamePhase::Late => {
            "Late game: group with your team and control vision around Baron and Dragon"
                .to_string()
        }
    };

    BasicPath { phase, text }
}
