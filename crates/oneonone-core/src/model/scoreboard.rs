// Real games as a fan sees them: the day's scoreboard and one game's box score.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::player::PlayerRecord;

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Scheduled,
    InProgress { inning: u8, top: bool },
    Final { innings: u8 },
}

impl GamePhase {
    pub fn has_started(&self) -> bool {
        !matches!(self, GamePhase::Scheduled)
    }
}

/// One club's side of a game: identity, record and running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamLine {
    pub id: String,
    pub name: String,
    pub market: String,
    pub abbr: String,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub wins: u32,
    pub losses: u32,
    /// Runs per inning, in order; `None` for an inning not batted (the "X"
    /// of a home team that did not need the bottom of the ninth).
    #[serde(default)]
    pub innings: Vec<Option<u32>>,
}

/// A game's line on the daily scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub id: String,
    pub scheduled: Option<DateTime<Utc>>,
    pub phase: GamePhase,
    pub away: TeamLine,
    pub home: TeamLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub date: NaiveDate,
    pub games: Vec<GameScore>,
}

/// Pitchers of record once a game is final.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingDecisions {
    pub win: Option<PlayerRecord>,
    pub loss: Option<PlayerRecord>,
    pub save: Option<PlayerRecord>,
}

/// Everything shown for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameBoxScore {
    pub score: GameScore,
    pub away_probable: Option<PlayerRecord>,
    pub home_probable: Option<PlayerRecord>,
    pub decisions: PitchingDecisions,
    /// Players with a line in this game.
    pub away_players: Vec<PlayerRecord>,
    pub home_players: Vec<PlayerRecord>,
}
