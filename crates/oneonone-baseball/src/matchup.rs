// Matchup generation: ten randomly drawn position duels from the valid pool.

use std::collections::HashSet;

use oneonone_core::model::{PlayerRecord, TeamSnapshot, ALL_SLOTS, PITCHER_SLOT, SLOT_COUNT};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A paired choice for one slot between players of two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub position: u8,
    pub first: PlayerRecord,
    pub second: PlayerRecord,
}

/// Result of assembling a draft board.
#[derive(Debug, Clone, PartialEq)]
pub enum Board {
    /// Ten matchups ordered by position 1..=10.
    Ready(Vec<Matchup>),
    /// Fewer than two distinct valid teams: there is no game to play today.
    NoGameAvailable,
    /// No pair of different teams could fill `position`.
    Unsatisfiable { position: u8, attempts: usize },
}

impl Board {
    pub fn matchups(&self) -> Option<&[Matchup]> {
        match self {
            Board::Ready(m) => Some(m),
            _ => None,
        }
    }
}

/// Assemble ten matchups from `teams`.
///
/// For each slot the pool is narrowed to the teams able to supply a
/// candidate (probable pitchers for slot 1, a lineup entry resolved against
/// the roster for slots 2..=10) and two entries are drawn uniformly without
/// replacement. A team listed twice (doubleheader) can be drawn against
/// itself; such draws are rejected and retried up to `max_draw_attempts`
/// times. Draws are independent across slots, so a team may appear in
/// several matchups.
pub fn generate_matchups<R: Rng + ?Sized>(
    teams: &[TeamSnapshot],
    rng: &mut R,
    max_draw_attempts: usize,
) -> Board {
    let clubs = distinct_teams(teams.iter());
    if clubs < 2 {
        debug!(pool = teams.len(), clubs, "not enough valid teams for a board");
        return Board::NoGameAvailable;
    }

    let mut matchups = Vec::with_capacity(SLOT_COUNT);
    for slot in ALL_SLOTS {
        let able: Vec<&TeamSnapshot> = teams.iter().filter(|t| candidate(t, slot).is_some()).collect();
        let able_clubs = distinct_teams(able.iter().copied());
        if able_clubs < 2 {
            warn!(slot, able_clubs, pool = teams.len(), "slot cannot be filled from pool");
            return Board::Unsatisfiable { position: slot, attempts: 0 };
        }

        match draw_matchup(&able, slot, rng, max_draw_attempts) {
            Some(m) => matchups.push(m),
            None => {
                warn!(slot, max_draw_attempts, "gave up drawing two different teams");
                return Board::Unsatisfiable {
                    position: slot,
                    attempts: max_draw_attempts,
                };
            }
        }
    }

    Board::Ready(matchups)
}

fn distinct_teams<'a>(teams: impl Iterator<Item = &'a TeamSnapshot>) -> usize {
    teams.map(|t| t.id.as_str()).collect::<HashSet<_>>().len()
}

/// Draw two entries of `able` belonging to different teams. Every entry of
/// `able` can fill `slot`.
fn draw_matchup<R: Rng + ?Sized>(
    able: &[&TeamSnapshot],
    slot: u8,
    rng: &mut R,
    max_draw_attempts: usize,
) -> Option<Matchup> {
    for attempt in 1..=max_draw_attempts {
        let pair = index::sample(rng, able.len(), 2);
        let (a, b) = (able[pair.index(0)], able[pair.index(1)]);
        if a.id == b.id {
            continue;
        }
        if let (Some(first), Some(second)) = (candidate(a, slot), candidate(b, slot)) {
            debug!(slot, attempt, first = %a.id, second = %b.id, "drew matchup");
            return Some(Matchup {
                position: slot,
                first: first.clone(),
                second: second.clone(),
            });
        }
    }
    None
}

/// The player `team` offers for `slot`, if it can offer one.
fn candidate(team: &TeamSnapshot, slot: u8) -> Option<&PlayerRecord> {
    if slot == PITCHER_SLOT {
        team.probable_pitcher.as_ref()
    } else if team.is_draftable() {
        team.player_in_slot(slot)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneonone_core::model::LineupEntry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    /// A fully draftable team whose slot-N player has id `{id}-{N}`.
    fn full_team(id: &str) -> TeamSnapshot {
        let roster: Vec<PlayerRecord> = (2..=10)
            .map(|slot| PlayerRecord::placeholder(&format!("{id}-{slot}"), id, &format!("S{slot}")))
            .collect();
        let lineup = (2..=10u8)
            .map(|slot| LineupEntry {
                player_id: format!("{id}-{slot}"),
                order: slot - 1,
                position: slot,
            })
            .collect();
        TeamSnapshot {
            id: id.into(),
            name: id.into(),
            lineup: Some(lineup),
            roster: Some(roster),
            probable_pitcher: Some(PlayerRecord::placeholder(&format!("{id}-sp"), id, "Starter")),
            ..Default::default()
        }
    }

    fn pool() -> Vec<TeamSnapshot> {
        ["SEA", "HOU", "NYY", "BOS"].iter().map(|id| full_team(id)).collect()
    }

    fn team_of(player: &PlayerRecord) -> &str {
        player.id.split('-').next().unwrap()
    }

    #[test]
    fn board_has_ten_distinct_positions_in_order() {
        let board = generate_matchups(&pool(), &mut test_rng(), 100);
        let matchups = board.matchups().expect("board should be ready");
        assert_eq!(matchups.len(), 10);
        let positions: Vec<u8> = matchups.iter().map(|m| m.position).collect();
        assert_eq!(positions, ALL_SLOTS.to_vec());
    }

    #[test]
    fn candidates_come_from_two_different_pool_entries() {
        for seed in 0..20 {
            let board = generate_matchups(&pool(), &mut ChaCha8Rng::seed_from_u64(seed), 100);
            for m in board.matchups().unwrap() {
                assert_ne!(team_of(&m.first), team_of(&m.second), "seed {seed} slot {}", m.position);
            }
        }
    }

    #[test]
    fn slot_one_uses_probable_pitchers_and_others_use_lineup_slot() {
        let board = generate_matchups(&pool(), &mut test_rng(), 100);
        for m in board.matchups().unwrap() {
            if m.position == 1 {
                assert!(m.first.id.ends_with("-sp"));
                assert!(m.second.id.ends_with("-sp"));
            } else {
                let suffix = format!("-{}", m.position);
                assert!(m.first.id.ends_with(&suffix), "{} in slot {}", m.first.id, m.position);
                assert!(m.second.id.ends_with(&suffix), "{} in slot {}", m.second.id, m.position);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate_matchups(&pool(), &mut ChaCha8Rng::seed_from_u64(7), 100);
        let b = generate_matchups(&pool(), &mut ChaCha8Rng::seed_from_u64(7), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn fewer_than_two_teams_is_no_game() {
        assert_eq!(generate_matchups(&[], &mut test_rng(), 100), Board::NoGameAvailable);
        assert_eq!(
            generate_matchups(&[full_team("SEA")], &mut test_rng(), 100),
            Board::NoGameAvailable
        );
    }

    #[test]
    fn no_pitcher_eligible_teams_is_unsatisfiable_at_slot_one() {
        let teams: Vec<TeamSnapshot> = pool()
            .into_iter()
            .map(|t| t.with_probable_pitcher(None))
            .collect();
        let board = generate_matchups(&teams, &mut test_rng(), 100);
        assert_eq!(board, Board::Unsatisfiable { position: 1, attempts: 0 });
    }

    #[test]
    fn teams_without_lineup_are_skipped_for_hitter_slots() {
        let mut teams = pool();
        teams[0].lineup = None;
        teams[1].roster = None;
        let board = generate_matchups(&teams, &mut test_rng(), 1000);
        for m in board.matchups().unwrap().iter().filter(|m| m.position > 1) {
            for p in [&m.first, &m.second] {
                assert!(matches!(team_of(p), "NYY" | "BOS"));
            }
        }
    }

    #[test]
    fn lineup_roster_mismatch_excludes_team_from_slot() {
        let mut teams = pool();
        // SEA's shortstop is missing from its roster.
        teams[0]
            .roster
            .as_mut()
            .unwrap()
            .retain(|p| p.id != "SEA-6");
        let board = generate_matchups(&teams, &mut test_rng(), 1000);
        let ss = &board.matchups().unwrap()[5];
        assert_eq!(ss.position, 6);
        assert_ne!(team_of(&ss.first), "SEA");
        assert_ne!(team_of(&ss.second), "SEA");
    }

    #[test]
    fn unsatisfiable_when_only_one_team_can_fill_a_slot() {
        let mut teams = pool();
        for t in teams.iter_mut().skip(1) {
            t.lineup.as_mut().unwrap().retain(|e| e.position != 10);
        }
        let board = generate_matchups(&teams, &mut test_rng(), 50);
        assert_eq!(board, Board::Unsatisfiable { position: 10, attempts: 0 });
    }

    #[test]
    fn doubleheader_entries_never_face_each_other() {
        // SEA listed twice plus one other club.
        let teams = vec![full_team("SEA"), full_team("SEA"), full_team("HOU")];
        for seed in 0..20 {
            let board = generate_matchups(&teams, &mut ChaCha8Rng::seed_from_u64(seed), 100);
            let matchups = board.matchups().expect("two clubs fill every slot");
            assert_eq!(matchups.len(), 10);
            for m in matchups {
                assert_ne!(m.first.id, m.second.id, "seed {seed} slot {}", m.position);
                assert_ne!(team_of(&m.first), team_of(&m.second));
            }
        }
    }

    #[test]
    fn one_club_listed_twice_is_no_game() {
        let teams = vec![full_team("SEA"), full_team("SEA")];
        assert_eq!(generate_matchups(&teams, &mut test_rng(), 100), Board::NoGameAvailable);
    }

    #[test]
    fn slot_filled_by_one_club_twice_is_unsatisfiable() {
        let mut teams = vec![full_team("SEA"), full_team("SEA"), full_team("HOU")];
        teams[2] = teams[2].with_probable_pitcher(None);
        let board = generate_matchups(&teams, &mut test_rng(), 100);
        assert_eq!(board, Board::Unsatisfiable { position: 1, attempts: 0 });
    }

    #[test]
    fn sparse_slot_is_filled_on_the_first_draw() {
        // Thirty clubs, only two with a probable pitcher.
        let teams: Vec<TeamSnapshot> = (0..30)
            .map(|i| {
                let t = full_team(&format!("T{i:02}"));
                if i < 2 { t } else { t.with_probable_pitcher(None) }
            })
            .collect();
        for seed in 0..50 {
            let board = generate_matchups(&teams, &mut ChaCha8Rng::seed_from_u64(seed), 1);
            let p = &board.matchups().expect("precheck passed, draw cannot fail")[0];
            let mut pair = [team_of(&p.first), team_of(&p.second)];
            pair.sort_unstable();
            assert_eq!(pair, ["T00", "T01"]);
        }
    }
}
