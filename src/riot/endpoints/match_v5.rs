use serde_json::Value;

use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;

impl RiotClient {
    /// Get list of match IDs by PUUID, newest first, optionally filtered by queue
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        count: u32,
        queue: Option<u16>,
    ) -> Result<Option<Vec<String>>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.regional_url(region),
            puuid
        );

        let mut query = vec![("count", count.to_string())];
        if let Some(queue) = queue {
            query.push(("queue", queue.to_string()));
        }

        self.get_optional(&url, &query).await
    }

    /// Get the raw match payload by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<Option<Value>, AppError> {
        let url = format!("{}/lol/match/v5/matches/{}", self.regional_url(region), match_id);

        self.get_optional(&url, &[]).await
    }
}
