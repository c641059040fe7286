use crate::error::AppError;
use crate::riot::{Platform, RiotClient, SummonerDto};

impl RiotClient {
    /// Get summoner by PUUID (level, icon and the encrypted summoner id)
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Option<SummonerDto>, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url(platform),
            puuid
        );

        self.get_optional(&url, &[]).await
    }
}
