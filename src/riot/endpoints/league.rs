use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::LeagueEntryDto;

impl RiotClient {
    /// Get league entries (ranked info) for a player by encrypted summoner id
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_league_entries(
        &self,
        platform: Platform,
        summoner_id: &str,
    ) -> Result<Option<Vec<LeagueEntryDto>>, AppError> {
        let url = format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            self.platform_url(platform),
            summoner_id
        );

        self.get_optional(&url, &[]).await
    }
}
