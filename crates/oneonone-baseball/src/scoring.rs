// Fantasy scoring: box-score lines to points.
//
// Pitcher (slot 1):
//   -3*ER + 3*ceil(IP) - H - BB + K + 4*W
// Hitter (slots 2..=10):
//   2*H + 2*BB + 2*RBI + 2*R + 6*HR + 4*SB
//
// A player with no line on the scoring day scores 0.

use oneonone_core::model::{
    DayStatistics, HittingStats, PitchingStats, PlayerRecord, Selection, PITCHER_SLOT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A draft with every selection's score filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDraft {
    pub selections: Vec<Selection>,
    pub total: i32,
}

pub fn pitcher_score(p: &PitchingStats) -> i32 {
    let earned_runs = p.earned_runs.unwrap_or(0) as i32;
    let innings = p.innings_pitched.ceil() as i32;
    -3 * earned_runs + 3 * innings - p.hits_allowed as i32 - p.walks_allowed as i32
        + p.strikeouts as i32
        + 4 * p.wins as i32
}

pub fn hitter_score(h: &HittingStats) -> i32 {
    2 * h.hits as i32
        + 2 * h.walks as i32
        + 2 * h.rbi as i32
        + 2 * h.runs as i32
        + 6 * h.home_runs as i32
        + 4 * h.stolen_bases as i32
}

/// Score one player's line for the given slot. Slot 1 reads the pitching
/// block, every other slot the hitting block; a missing block scores 0.
pub fn score_player(position: u8, player: &PlayerRecord) -> i32 {
    if position == PITCHER_SLOT {
        player.pitching.as_ref().map_or(0, pitcher_score)
    } else {
        player.hitting.as_ref().map_or(0, hitter_score)
    }
}

/// Score a draft against one day's statistics.
///
/// Each selection is looked up by player id across every game of the day.
/// Players who did not appear are scored from a stat-less placeholder,
/// i.e. 0. The output keeps the input order; the total is the plain sum.
pub fn score_draft(stats: &DayStatistics, picks: &[Selection]) -> ScoredDraft {
    let selections: Vec<Selection> = picks
        .iter()
        .map(|pick| {
            let placeholder;
            let player = match stats.find_player(&pick.player_id) {
                Some(p) => p,
                None => {
                    debug!(player_id = %pick.player_id, day = %stats.date, "no line on scoring day");
                    placeholder =
                        PlayerRecord::placeholder(&pick.player_id, &pick.first_name, &pick.last_name);
                    &placeholder
                }
            };
            Selection {
                position: pick.position,
                player_id: player.id.clone(),
                first_name: player.first_name.clone(),
                last_name: player.last_name.clone(),
                score: score_player(pick.position, player),
            }
        })
        .collect();

    let total = selections.iter().map(|s| s.score).sum();
    ScoredDraft { selections, total }
}
