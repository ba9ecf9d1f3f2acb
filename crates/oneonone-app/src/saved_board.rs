// The board last printed by `board`, kept beside the database so `play`
// drafts the matchups the user actually saw.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use oneonone_baseball::Matchup;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub day: NaiveDate,
    pub seed: u64,
    pub matchups: Vec<Matchup>,
}

impl SavedBoard {
    /// `board.json` next to the database file; in-memory databases keep no board.
    pub fn path_for(db_path: &Path) -> Option<PathBuf> {
        if db_path.as_os_str() == ":memory:" {
            return None;
        }
        Some(db_path.with_file_name("board.json"))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to encode board")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), day = %self.day, "board saved");
        Ok(())
    }

    /// `Ok(None)` when no board has been saved yet.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        let board = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(board))
    }

    /// True when a redraw for the same day and seed came out different,
    /// meaning the provider data moved since this board was shown.
    pub fn diverges_from(&self, day: NaiveDate, seed: u64, matchups: &[Matchup]) -> bool {
        self.day == day && self.seed == seed && self.matchups != matchups
    }
}
