use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;

/// Derived fields of a persisted objective timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSchedule {
    pub respawn_time: DateTime<Utc>,
    pub game_time_minutes: i64,
}

impl TimerSchedule {
    /// `respawn_time = spawn + respawn_seconds`, and the game minute is the
    /// floor of the offset from the session start (negative if the spawn
    /// predates the session).
    pub fn compute(
        spawn_time: DateTime<Utc>,
        respawn_seconds: i64,
        session_started_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        if respawn_seconds < 0 {
            return Err(AppError::Validation(format!(
                "respawn_seconds must be non-negative, got {respawn_seconds}"
            )));
        }

        let respawn_time = spawn_time
            .checked_add_signed(Duration::seconds(respawn_seconds))
            .ok_or_else(|| AppError::Validation("respawn_time out of range".into()))?;

        let offset = spawn_time.signed_duration_since(session_started_at);
        let game_time_minutes = offset.num_seconds().div_euclid(60);

        Ok(Self {
            respawn_time,
            game_time_minutes,
        })
    }
}
