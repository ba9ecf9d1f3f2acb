// Drafted selections and the persisted fantasy game record.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One drafted player for one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub position: u8,
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Zero until the game is scored.
    #[serde(default)]
    pub score: i32,
}

impl Selection {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Final totals of a scored game. Both sides are always settled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub user: i32,
    pub opponent: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Drafted,
    Scored,
}

/// Result of a scored game from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Sign of `user - opponent`.
    pub fn from_totals(user: i32, opponent: i32) -> Self {
        match user.cmp(&opponent) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// One play-through: the user's draft, the auto-drafted opponent, and the
/// final totals once the scoring day has been settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyGame {
    pub user_picks: Vec<Selection>,
    pub opponent_picks: Vec<Selection>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub result: Option<FinalScore>,
}

impl FantasyGame {
    /// A freshly drafted, unscored game. Any scores already present on the
    /// selections are reset to zero.
    pub fn drafted(
        user_picks: Vec<Selection>,
        opponent_picks: Vec<Selection>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let reset = |picks: Vec<Selection>| {
            picks
                .into_iter()
                .map(|s| Selection { score: 0, ..s })
                .collect::<Vec<_>>()
        };
        FantasyGame {
            user_picks: reset(user_picks),
            opponent_picks: reset(opponent_picks),
            created_at,
            result: None,
        }
    }

    pub fn state(&self) -> GameState {
        if self.result.is_some() {
            GameState::Scored
        } else {
            GameState::Drafted
        }
    }

    pub fn is_scored(&self) -> bool {
        self.state() == GameState::Scored
    }

    pub fn user_total(&self) -> Option<i32> {
        self.result.map(|r| r.user)
    }

    pub fn opponent_total(&self) -> Option<i32> {
        self.result.map(|r| r.opponent)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.result.map(|r| Outcome::from_totals(r.user, r.opponent))
    }

    /// The day whose games settle this draft: the creation date in the
    /// league time zone, plus one.
    pub fn scoring_day<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        scoring_day_for(self.created_at, tz)
    }

    /// True once the scoring day has fully passed in the league time zone.
    pub fn is_settled<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> bool {
        now.with_timezone(tz).date_naive() > self.scoring_day(tz)
    }
}

/// Scoring day of a game drafted at `created_at`.
pub fn scoring_day_for<Tz: TimeZone>(created_at: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    created_at.with_timezone(tz).date_naive() + Days::new(1)
}

/// Lineup day of a board drafted at `at`. Its next day, which supplies the
/// probable pitchers, is the scoring day of the game drafted from it.
pub fn board_day_for<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    scoring_day_for(at, tz) - Days::new(1)
}
