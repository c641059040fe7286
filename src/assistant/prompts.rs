//! Prompt builders. Each one is a pure function from its input record to a
//! [`Prompt`]; sending is done by [`super::AssistantClient::send`].

use super::review::{ChampionPreferences, GameState, MatchReview, PathingReview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn performance_review(review: &MatchReview) -> Prompt {
    let system = "You are an expert League of Legends coach specialised in the jungle. \
        Analyse the jungler's performance from the match data and give specific, \
        constructive advice."
        .to_string();

    let user = format!(
        "Analyse this jungle game:\n\n\
         Champion: {}\n\
         Result: {}\n\
         KDA: {}\n\
         Total CS: {}\n\
         Jungle CS: {}\n\
         Vision score: {}\n\
         Duration: {} minutes\n\
         Dragons: {}\n\
         Barons: {}\n\n\
         Give a detailed analysis with:\n\
         1. Strengths shown in this game\n\
         2. Specific areas to improve\n\
         3. Actionable tips for the next game\n\
         4. A rating from 1 to 10 and why\n\n\
         Keep the analysis constructive and focused on improvement.",
        review.champion,
        review.outcome(),
        review.kda(),
        review.cs,
        review.jungle_cs,
        review.vision_score,
        review.duration_minutes,
        review.dragons,
        review.barons,
    );

    Prompt { system, user }
}

pub fn realtime_suggestions(state: &GameState) -> Prompt {
    let system = "You are an expert jungle assistant giving real-time advice. \
        Provide specific, actionable suggestions based on the current game state."
        .to_string();

    let objectives = if state.available_objectives.is_empty() {
        "none".to_string()
    } else {
        state.available_objectives.join(", ")
    };

    let enemy = state
        .enemy_jungle
        .as_deref()
        .map(|e| format!("\nEnemy jungler: {e}"))
        .unwrap_or_default();

    let user = format!(
        "Current game state:\n\n\
         Game time: {} minutes\n\
         Champion: {}\n\
         Level: {}\n\
         Gold: {}\n\
         Available objectives: {}\n\
         Team state: {}{}\n\n\
         Give exactly 3 specific suggestions for the next 2-3 minutes of the game. \
         Be concise and focus on concrete actions.",
        state.game_time,
        state.champion,
        state.level,
        state.gold,
        objectives,
        state.team_state,
        enemy,
    );

    Prompt { system, user }
}

pub fn champion_recommendation(prefs: &ChampionPreferences) -> Prompt {
    let system = "You are an expert on the League of Legends meta and champion select. \
        Recommend jungle champions based on the user's preferences and the enemy composition."
        .to_string();

    let favorites = if prefs.favorite_champions.is_empty() {
        "none specified".to_string()
    } else {
        prefs.favorite_champions.join(", ")
    };

    let enemy = match &prefs.enemy_team {
        Some(team) if !team.is_empty() => format!("\nEnemy team: {}", team.join(", ")),
        _ => String::new(),
    };

    let user = format!(
        "User preferences:\n\n\
         Preferred playstyle: {}\n\
         Favorite champions: {}\n\
         Current rank: {}\n\
         Goal: {}{}\n\n\
         Recommend 3 jungle champions, each with:\n\
         1. Why it is a good pick\n\
         2. Suggested playstyle\n\
         3. Main objective in early, mid and late game\n\n\
         Keep the recommendations in line with the current meta.",
        prefs.playstyle,
        favorites,
        prefs.rank.as_deref().unwrap_or("not specified"),
        prefs.goal.as_deref().unwrap_or("improve overall"),
        enemy,
    );

    Prompt { system, user }
}

pub fn pathing_analysis(review: &PathingReview) -> Prompt {
    let system = "You are an expert jungle pathing coach. Analyse the efficiency of the \
        jungle route and give specific advice to optimise the clear."
        .to_string();

    let user = format!(
        "Analyse this jungle efficiency:\n\n\
         Champion: {}\n\
         Jungle CS: {}\n\
         CS per minute: {:.1}\n\
         Game duration: {} minutes\n\
         Final level: {}\n\n\
         Give specific advice on:\n\
         1. Jungle clear efficiency\n\
         2. Recommended pathing for this champion\n\
         3. Optimal objective timing\n\
         4. Balance between farming and ganking",
        review.champion,
        review.jungle_cs,
        review.jungle_cs_per_minute,
        review.duration_minutes,
        review.champion_level,
    );

    Prompt { system, user }
}
