// Team snapshots: one team's lineup, roster and probable pitcher for a day.

use serde::{Deserialize, Serialize};

use super::player::PlayerRecord;

/// One batting-order entry of a posted lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player_id: String,
    /// Batting order (1..=9).
    pub order: u8,
    /// Draft slot the entry fills (1 = pitcher, 2..=10 fielding positions).
    pub position: u8,
}

/// A team as seen on a given day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(default)]
    pub lineup: Option<Vec<LineupEntry>>,
    #[serde(default)]
    pub roster: Option<Vec<PlayerRecord>>,
    #[serde(default)]
    pub probable_pitcher: Option<PlayerRecord>,
}

impl TeamSnapshot {
    /// Both a roster and a lineup are present.
    pub fn is_draftable(&self) -> bool {
        self.roster.is_some() && self.lineup.is_some()
    }

    pub fn is_pitcher_eligible(&self) -> bool {
        self.probable_pitcher.is_some()
    }

    /// Copy of this snapshot with its probable pitcher replaced.
    pub fn with_probable_pitcher(&self, pitcher: Option<PlayerRecord>) -> TeamSnapshot {
        TeamSnapshot {
            probable_pitcher: pitcher,
            ..self.clone()
        }
    }

    /// Resolve the player filling `slot` in this team's lineup.
    ///
    /// Returns `None` when the team has no lineup or roster, when no lineup
    /// entry fills the slot, or when the entry points at a player id missing
    /// from the roster.
    pub fn player_in_slot(&self, slot: u8) -> Option<&PlayerRecord> {
        let entry = self.lineup.as_ref()?.iter().find(|e| e.position == slot)?;
        self.roster
            .as_ref()?
            .iter()
            .find(|p| p.id == entry.player_id)
    }

    pub fn display_name(&self) -> String {
        if self.market.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.market, self.name)
        }
    }
}
