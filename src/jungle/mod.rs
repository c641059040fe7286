//! Jungle reference data and the pure computations behind the timer and
//! pathing endpoints.

pub mod champions;
pub mod objectives;
pub mod pathing;
pub mod timers;

pub use champions::{ChampionJungleStats, champion_key, jungle_stats_for};
pub use objectives::{ObjectiveTimers, STANDARD_TIMERS};
pub use pathing::{BasicPath, GamePhase, basic_path};
pub use timers::TimerSchedule;
