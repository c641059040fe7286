//! `setup-user`: resolve the configured player against Riot and store it.

use tracing::info;

use crate::db::{NewUser, Repository, User};
use crate::error::AppError;
use crate::riot::{DEFAULT_MATCH_COUNT, RiotClient};

pub const DEFAULT_PREFERRED_CHAMPIONS: [&str; 6] =
    ["Graves", "Kindred", "Kha'Zix", "Nidalee", "Hecarim", "Viego"];

/// Look the player up and upsert the `users` row with their solo rank and
/// the default champion pool.
pub async fn setup_user(
    riot: &RiotClient,
    repo: &Repository,
    game_name: &str,
    tag_line: &str,
    region: &str,
) -> Result<User, AppError> {
    info!("👤 [SETUP] resolving {}#{} on {}", game_name, tag_line, region);

    let aggregate = riot
        .get_complete_summoner(game_name, tag_line, region, DEFAULT_MATCH_COUNT)
        .await?;

    let rank = aggregate.rank.as_ref();
    let user = repo
        .upsert_user(&NewUser {
            riot_id: aggregate
                .account
                .game_name
                .clone()
                .unwrap_or_else(|| game_name.to_string()),
            tag_line: aggregate
                .account
                .tag_line
                .clone()
                .unwrap_or_else(|| tag_line.to_string()),
            region: region.to_string(),
            puuid: Some(aggregate.account.puuid.clone()),
            rank_tier: rank.map(|r| r.tier.clone()),
            rank_division: rank.map(|r| r.rank.clone()),
            league_points: rank.map(|r| i64::from(r.league_points)).unwrap_or(0),
            preferred_jungle_champions: DEFAULT_PREFERRED_CHAMPIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        })
        .await?;

    match rank {
        Some(r) => info!(
            "✅ [SETUP] {} stored as user {} ({} {} {} LP, {}% wr)",
            user.full_riot_id(),
            user.id,
            r.tier,
            r.rank,
            r.league_points,
            r.winrate
        ),
        None => info!(
            "✅ [SETUP] {} stored as user {} (unranked)",
            user.full_riot_id(),
            user.id
        ),
    }

    Ok(user)
}
