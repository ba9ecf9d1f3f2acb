// The ten draft slots of a one-on-one game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot number of the pitcher duel.
pub const PITCHER_SLOT: u8 = 1;

/// Number of matchups (and selections) in a complete game.
pub const SLOT_COUNT: usize = 10;

/// Every slot in board order.
pub const ALL_SLOTS: [u8; SLOT_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Fielding position of a slot. Slot 1 is the probable pitcher, slots 2..=10
/// follow the provider's lineup `position` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    ShortStop,
    LeftField,
    CenterField,
    RightField,
    DesignatedHitter,
}

impl Position {
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Position::Pitcher),
            2 => Some(Position::Catcher),
            3 => Some(Position::FirstBase),
            4 => Some(Position::SecondBase),
            5 => Some(Position::ThirdBase),
            6 => Some(Position::ShortStop),
            7 => Some(Position::LeftField),
            8 => Some(Position::CenterField),
            9 => Some(Position::RightField),
            10 => Some(Position::DesignatedHitter),
            _ => None,
        }
    }

    pub fn slot(&self) -> u8 {
        match self {
            Position::Pitcher => 1,
            Position::Catcher => 2,
            Position::FirstBase => 3,
            Position::SecondBase => 4,
            Position::ThirdBase => 5,
            Position::ShortStop => 6,
            Position::LeftField => 7,
            Position::CenterField => 8,
            Position::RightField => 9,
            Position::DesignatedHitter => 10,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::ShortStop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::Pitcher)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// Display abbreviation for a raw slot number; unknown slots render as `?`.
pub fn slot_abbr(slot: u8) -> &'static str {
    Position::from_slot(slot).map_or("?", |p| p.display_str())
}
