// Stat provider contract: schedules, lineups and box-score statistics by day,
// plus the scoreboard and single-game views.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{
    DaySchedule, DayStatistics, GameBoxScore, LightDaySchedule, PlayerRecord, Scoreboard,
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("stat provider returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ProviderError {
    /// Whether re-issuing the same request later could succeed. Transport
    /// failures, rate limiting and server errors qualify; malformed payloads
    /// and client errors do not.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport { .. } => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Decode { .. } => false,
        }
    }
}

/// Source of daily baseball data.
///
/// Implementations perform their own I/O; callers never retry internally.
#[async_trait]
pub trait StatProvider: Send + Sync {
    /// Full schedule detail for `date`: rosters, lineups, probable pitchers
    /// and whatever stat lines exist so far.
    async fn fetch_day_detail(&self, date: NaiveDate) -> Result<DaySchedule, ProviderError>;

    /// Lightweight schedule for `date`: team identities and probable pitchers.
    async fn fetch_day_summary(&self, date: NaiveDate) -> Result<LightDaySchedule, ProviderError>;

    /// Settled hitting/pitching totals for every player who appeared on `date`.
    async fn fetch_day_statistics(&self, date: NaiveDate) -> Result<DayStatistics, ProviderError>;

    /// A single player's profile.
    async fn fetch_player(&self, player_id: &str) -> Result<PlayerRecord, ProviderError>;

    /// Every game on `date` with its status and running score.
    async fn fetch_scoreboard(&self, date: NaiveDate) -> Result<Scoreboard, ProviderError>;

    /// Line score, pitchers of record and player lines for one game.
    async fn fetch_box_score(&self, game_id: &str) -> Result<GameBoxScore, ProviderError>;
}
