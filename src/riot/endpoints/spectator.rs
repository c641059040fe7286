use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::CurrentGameInfo;

impl RiotClient {
    /// Get the game a summoner is currently playing. `None` means not in game.
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_active_game(
        &self,
        platform: Platform,
        summoner_id: &str,
    ) -> Result<Option<CurrentGameInfo>, AppError> {
        let url = format!(
            "{}/lol/spectator/v4/active-games/by-summoner/{}",
            self.platform_url(platform),
            summoner_id
        );

        self.get_optional(&url, &[]).await
    }
}
