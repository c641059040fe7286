use std::sync::Arc;

use crate::assistant::AssistantClient;
use crate::db::Repository;
use crate::riot::RiotClient;

/// Shared handles given to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub riot: Arc<RiotClient>,
    pub assistant: Arc<AssistantClient>,
    pub repo: Repository,
    /// Region code used when a request does not name one.
    pub default_region: String,
}

impl AppState {
    pub fn new(
        riot: RiotClient,
        assistant: AssistantClient,
        repo: Repository,
        default_region: String,
    ) -> Self {
        Self {
            riot: Arc::new(riot),
            assistant: Arc::new(assistant),
            repo,
            default_region,
        }
    }

    pub fn region_or_default<'a>(&'a self, region: Option<&'a str>) -> &'a str {
        region.unwrap_or(&self.default_region)
    }
}
