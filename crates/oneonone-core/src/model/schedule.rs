// Day-level views returned by the stat provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::player::PlayerRecord;
use super::team::TeamSnapshot;

/// A scheduled game with full detail for both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: String,
    /// Provider status string ("scheduled", "inprogress", "closed", ...).
    #[serde(default)]
    pub status: String,
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
}

/// Full schedule detail for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub games: Vec<ScheduledGame>,
}

/// Home/away pairing in a lightweight day summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePairing {
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
}

/// Lightweight schedule: team identities and probable pitchers, no live stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDaySchedule {
    pub date: NaiveDate,
    pub games: Vec<GamePairing>,
}

/// Every player who appeared for either side of one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatLines {
    pub home: Vec<PlayerRecord>,
    pub away: Vec<PlayerRecord>,
}

/// Settled per-player statistics for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatistics {
    pub date: NaiveDate,
    pub games: Vec<GameStatLines>,
}

impl DayStatistics {
    /// Find a player's line anywhere in the day. When a player shows up in
    /// more than one game (doubleheader), the first game listed wins.
    pub fn find_player(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.games
            .iter()
            .flat_map(|g| g.away.iter().chain(g.home.iter()))
            .find(|p| p.id == player_id)
    }

    pub fn player_count(&self) -> usize {
        self.games.iter().map(|g| g.home.len() + g.away.len()).sum()
    }
}
