pub mod client;
pub mod endpoints;
pub mod live_game;
pub mod region;
pub mod summary;
pub mod types;

pub use client::RiotClient;
pub use live_game::LiveGameStatus;
pub use region::{Platform, Region, Routing};
pub use summary::{DEFAULT_MATCH_COUNT, RankSummary, SummonerAggregate};
pub use types::*;
