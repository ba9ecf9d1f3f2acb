// Player records and the per-day stat blocks attached to them.

use serde::{Deserialize, Serialize};

/// A player's batting line for one day (or a season total on profile lookups).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HittingStats {
    pub at_bats: u32,
    pub hits: u32,
    pub walks: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub runs: u32,
    pub stolen_bases: u32,
}

/// A player's pitching line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingStats {
    /// Innings pitched in box-score notation: `6.1` is six and one third.
    pub innings_pitched: f64,
    /// Absent when the provider did not split earned from unearned runs.
    pub earned_runs: Option<u32>,
    pub hits_allowed: u32,
    pub walks_allowed: u32,
    pub strikeouts: u32,
    pub wins: u32,
    pub losses: u32,
    pub saves: u32,
}

/// A single player as reported by the stat provider.
///
/// Identity is `id`; the name fields are display-only but are carried into
/// drafted selections so a player who never appears on the scoring day can
/// still be shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub primary_position: Option<String>,
    #[serde(default)]
    pub jersey_number: Option<String>,
    #[serde(default)]
    pub hitting: Option<HittingStats>,
    #[serde(default)]
    pub pitching: Option<PitchingStats>,
}

impl PlayerRecord {
    /// Build a stat-less record carrying only identity and name.
    pub fn placeholder(id: &str, first_name: &str, last_name: &str) -> Self {
        PlayerRecord {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether neither a hitting nor a pitching block is present.
    pub fn has_no_stats(&self) -> bool {
        self.hitting.is_none() && self.pitching.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_carries_identity_only() {
        let p = PlayerRecord::placeholder("abc", "Mookie", "Betts");
        assert_eq!(p.id, "abc");
        assert_eq!(p.full_name(), "Mookie Betts");
        assert!(p.has_no_stats());
        assert!(p.position.is_none());
    }

    #[test]
    fn missing_stat_blocks_deserialize_as_none() {
        let p: PlayerRecord =
            serde_json::from_str(r#"{"id":"x","first_name":"A","last_name":"B"}"#).unwrap();
        assert!(p.hitting.is_none());
        assert!(p.pitching.is_none());
    }
}
