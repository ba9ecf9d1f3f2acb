pub mod game;
pub mod player;
pub mod position;
pub mod schedule;
pub mod scoreboard;
pub mod team;

pub use game::{
    board_day_for, scoring_day_for, FantasyGame, FinalScore, GameState, Outcome, Selection,
};
pub use player::{HittingStats, PitchingStats, PlayerRecord};
pub use position::{slot_abbr, Position, ALL_SLOTS, PITCHER_SLOT, SLOT_COUNT};
pub use schedule::{
    DaySchedule, DayStatistics, GamePairing, GameStatLines, LightDaySchedule, ScheduledGame,
};
pub use scoreboard::{GameBoxScore, GamePhase, GameScore, PitchingDecisions, Scoreboard, TeamLine};
pub use team::{LineupEntry, TeamSnapshot};
