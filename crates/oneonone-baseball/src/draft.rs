// Turning a board into drafts: the user's picks, the auto-drafted opponent,
// and validation of a complete draft.

use oneonone_core::model::{PlayerRecord, Selection, ALL_SLOTS, SLOT_COUNT};
use rand::Rng;
use thiserror::Error;

use crate::matchup::Matchup;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("a draft needs exactly {expected} selections, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("selection position {0} is outside 1..=10")]
    BadPosition(u8),

    #[error("position {0} was drafted more than once")]
    DuplicatePosition(u8),

    #[error("expected one side per matchup ({matchups}), got {sides}")]
    SideCount { matchups: usize, sides: usize },
}

/// Which candidate of a matchup was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Parse `1`/`2` or `f`/`s` style input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "f" | "first" | "l" | "left" => Some(Side::First),
            "2" | "s" | "second" | "r" | "right" => Some(Side::Second),
            _ => None,
        }
    }
}

impl Matchup {
    pub fn candidate(&self, side: Side) -> &PlayerRecord {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Draft one side of this matchup.
    pub fn select(&self, side: Side) -> Selection {
        let player = self.candidate(side);
        Selection {
            position: self.position,
            player_id: player.id.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            score: 0,
        }
    }
}

/// The user's draft: one chosen side per matchup, in board order.
pub fn user_draft(matchups: &[Matchup], sides: &[Side]) -> Result<Vec<Selection>, DraftError> {
    if matchups.len() != sides.len() {
        return Err(DraftError::SideCount {
            matchups: matchups.len(),
            sides: sides.len(),
        });
    }
    let picks: Vec<Selection> = matchups
        .iter()
        .zip(sides)
        .map(|(m, &side)| m.select(side))
        .collect();
    validate_draft(&picks)?;
    Ok(picks)
}

/// The opponent's draft: each matchup decided by an independent coin flip.
pub fn auto_draft<R: Rng + ?Sized>(matchups: &[Matchup], rng: &mut R) -> Vec<Selection> {
    matchups
        .iter()
        .map(|m| {
            let side = if rng.gen_bool(0.5) { Side::Second } else { Side::First };
            m.select(side)
        })
        .collect()
}

/// A complete draft has exactly ten selections covering positions 1..=10
/// once each, in any order.
pub fn validate_draft(picks: &[Selection]) -> Result<(), DraftError> {
    if picks.len() != SLOT_COUNT {
        return Err(DraftError::WrongLength {
            expected: SLOT_COUNT,
            actual: picks.len(),
        });
    }
    let mut seen = [false; SLOT_COUNT];
    for pick in picks {
        if !ALL_SLOTS.contains(&pick.position) {
            return Err(DraftError::BadPosition(pick.position));
        }
        let idx = usize::from(pick.position - 1);
        if seen[idx] {
            return Err(DraftError::DuplicatePosition(pick.position));
        }
        seen[idx] = true;
    }
    Ok(())
}
