// SQLite persistence layer for fantasy game records.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::model::{FantasyGame, FinalScore, Selection};
use crate::store::{GameId, GameRecordStore, StoreError};

/// SQLite-backed store for [`FantasyGame`] records.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS fantasy_games (
                id             TEXT PRIMARY KEY,
                created_at     TEXT NOT NULL,
                user_picks     TEXT NOT NULL,
                opponent_picks TEXT NOT NULL,
                user_total     INTEGER,
                opponent_total INTEGER,
                CHECK ((user_total IS NULL) = (opponent_total IS NULL))
            );

            CREATE INDEX IF NOT EXISTS idx_fantasy_games_created_at
                ON fantasy_games(created_at);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Generate a fresh opaque game id.
    pub fn generate_game_id() -> GameId {
        uuid::Uuid::new_v4().to_string()
    }

    fn insert(&self, id: &str, game: &FantasyGame) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO fantasy_games
                (id, created_at, user_picks, opponent_picks, user_total, opponent_total)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                encode_timestamp(&game.created_at),
                encode_picks(&game.user_picks)?,
                encode_picks(&game.opponent_picks)?,
                game.user_total(),
                game.opponent_total(),
            ],
        )
        .context("failed to insert fantasy game")?;
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<FantasyGame>> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT created_at, user_picks, opponent_picks, user_total, opponent_total
                 FROM fantasy_games WHERE id = ?1",
                params![id],
                raw_row,
            )
            .optional()
            .context("failed to query fantasy game")?;
        row.map(RawGame::decode).transpose()
    }

    /// Compare-and-set replacement: only touches a row whose totals are
    /// still NULL. Returns the number of rows changed.
    fn replace_unscored(&self, id: &str, game: &FantasyGame) -> Result<usize> {
        let conn = self.conn();
        let changed = conn
            .execute(
                "UPDATE fantasy_games
                 SET created_at = ?2, user_picks = ?3, opponent_picks = ?4,
                     user_total = ?5, opponent_total = ?6
                 WHERE id = ?1 AND user_total IS NULL AND opponent_total IS NULL",
                params![
                    id,
                    encode_timestamp(&game.created_at),
                    encode_picks(&game.user_picks)?,
                    encode_picks(&game.opponent_picks)?,
                    game.user_total(),
                    game.opponent_total(),
                ],
            )
            .context("failed to update fantasy game")?;
        Ok(changed)
    }

    fn exists(&self, id: &str) -> Result<bool> {
        let conn = self.conn();
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM fantasy_games WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
            .context("failed to check fantasy game existence")?;
        Ok(exists)
    }

    fn load_all(&self) -> Result<Vec<(GameId, FantasyGame)>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id, created_at, user_picks, opponent_picks, user_total, opponent_total
                 FROM fantasy_games ORDER BY created_at DESC, id",
            )
            .context("failed to prepare list query")?;

        let rows = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let raw = RawGame {
                    created_at: row.get(1)?,
                    user_picks: row.get(2)?,
                    opponent_picks: row.get(3)?,
                    user_total: row.get(4)?,
                    opponent_total: row.get(5)?,
                };
                Ok((id, raw))
            })
            .context("failed to query fantasy games")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map fantasy game rows")?;

        rows.into_iter()
            .map(|(id, raw)| raw.decode().map(|game| (id, game)))
            .collect()
    }
}

impl GameRecordStore for Database {
    fn create(&self, game: &FantasyGame) -> Result<GameId, StoreError> {
        let id = Self::generate_game_id();
        self.insert(&id, game)?;
        debug!(game_id = %id, "stored new fantasy game");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<FantasyGame, StoreError> {
        self.load(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, game: &FantasyGame) -> Result<(), StoreError> {
        if self.replace_unscored(id, game)? == 1 {
            debug!(game_id = %id, scored = game.is_scored(), "updated fantasy game");
            return Ok(());
        }
        if self.exists(id)? {
            Err(StoreError::AlreadyScored(id.to_string()))
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    fn list(&self) -> Result<Vec<(GameId, FantasyGame)>, StoreError> {
        Ok(self.load_all()?)
    }
}

// ---------------------------------------------------------------------------
// Row encoding
// ---------------------------------------------------------------------------

struct RawGame {
    created_at: String,
    user_picks: String,
    opponent_picks: String,
    user_total: Option<i32>,
    opponent_total: Option<i32>,
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawGame> {
    Ok(RawGame {
        created_at: row.get(0)?,
        user_picks: row.get(1)?,
        opponent_picks: row.get(2)?,
        user_total: row.get(3)?,
        opponent_total: row.get(4)?,
    })
}

impl RawGame {
    fn decode(self) -> Result<FantasyGame> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("invalid created_at timestamp {}", self.created_at))?
            .with_timezone(&Utc);
        let result = match (self.user_total, self.opponent_total) {
            (Some(user), Some(opponent)) => Some(FinalScore { user, opponent }),
            (None, None) => None,
            _ => return Err(anyhow!("fantasy game row has only one final total set")),
        };
        Ok(FantasyGame {
            user_picks: decode_picks(&self.user_picks)?,
            opponent_picks: decode_picks(&self.opponent_picks)?,
            created_at,
            result,
        })
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    // Fixed-width nanoseconds keep full precision and text order.
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn encode_picks(picks: &[Selection]) -> Result<String> {
    serde_json::to_string(picks).context("failed to serialize selections")
}

fn decode_picks(json: &str) -> Result<Vec<Selection>> {
    serde_json::from_str(json).context("failed to deserialize selections")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Helper: create a fresh in-memory database for each test.
    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    fn picks(prefix: &str) -> Vec<Selection> {
        (1..=10)
            .map(|position| Selection {
                position,
                player_id: format!("{prefix}-{position}"),
                first_name: "First".into(),
                last_name: format!("Last{position}"),
                score: 0,
            })
            .collect()
    }

    fn sample_game(day: u32) -> FantasyGame {
        FantasyGame::drafted(
            picks("u"),
            picks("o"),
            Utc.with_ymd_and_hms(2024, 6, day, 18, 0, 0).unwrap(),
        )
    }

    fn scored(mut game: FantasyGame) -> FantasyGame {
        for (i, s) in game.user_picks.iter_mut().enumerate() {
            s.score = i as i32;
        }
        game.result = Some(FinalScore { user: 45, opponent: 0 });
        game
    }

    #[test]
    fn open_creates_table() {
        let db = test_db();
        let conn = db.conn();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='fantasy_games'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn create_then_get_returns_equivalent_unscored_record() {
        let db = test_db();
        let game = sample_game(1);
        let id = db.create(&game).unwrap();

        let loaded = db.get(&id).unwrap();
        assert_eq!(loaded, game);
        assert!(!loaded.is_scored());
    }

    #[test]
    fn sub_millisecond_created_at_survives_round_trip() {
        let db = test_db();
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 16, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let game = FantasyGame::drafted(picks("u"), picks("o"), created);
        let id = db.create(&game).unwrap();

        let loaded = db.get(&id).unwrap();
        assert_eq!(loaded.created_at, created);
        assert_eq!(loaded, game);
    }

    #[test]
    fn list_orders_by_sub_second_created_at() {
        let db = test_db();
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 16, 0, 0).unwrap();
        let earlier = db
            .create(&FantasyGame::drafted(picks("u"), picks("o"), base + chrono::Duration::nanoseconds(900)))
            .unwrap();
        let later = db
            .create(&FantasyGame::drafted(picks("u"), picks("o"), base + chrono::Duration::milliseconds(5)))
            .unwrap();

        let ids: Vec<String> = db.list().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![later, earlier]);
    }

    #[test]
    fn ids_are_unique() {
        let db = test_db();
        let a = db.create(&sample_game(1)).unwrap();
        let b = db.create(&sample_game(1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let db = test_db();
        assert!(matches!(db.get("nope"), Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn update_replaces_unscored_record() {
        let db = test_db();
        let id = db.create(&sample_game(1)).unwrap();
        let done = scored(db.get(&id).unwrap());

        db.update(&id, &done).unwrap();
        let loaded = db.get(&id).unwrap();
        assert_eq!(loaded.user_total(), Some(45));
        assert_eq!(loaded.opponent_total(), Some(0));
        assert_eq!(loaded.user_picks[3].score, 3);
    }

    #[test]
    fn update_rejects_already_scored_record() {
        let db = test_db();
        let id = db.create(&sample_game(1)).unwrap();
        let done = scored(db.get(&id).unwrap());
        db.update(&id, &done).unwrap();

        let mut again = done.clone();
        again.result = Some(FinalScore { user: 1, opponent: 2 });
        assert!(matches!(db.update(&id, &again), Err(StoreError::AlreadyScored(_))));
        assert_eq!(db.get(&id).unwrap().user_total(), Some(45));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let db = test_db();
        let game = sample_game(1);
        assert!(matches!(db.update("ghost", &game), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn schema_rejects_half_scored_rows() {
        let db = test_db();
        let conn = db.conn();
        let result = conn.execute(
            "INSERT INTO fantasy_games
                (id, created_at, user_picks, opponent_picks, user_total, opponent_total)
             VALUES ('x', '2024-06-01T00:00:00.000Z', '[]', '[]', 3, NULL)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn list_returns_newest_first() {
        let db = test_db();
        let older = db.create(&sample_game(1)).unwrap();
        let newer = db.create(&sample_game(3)).unwrap();
        let middle = db.create(&sample_game(2)).unwrap();

        let ids: Vec<GameId> = db.list().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![newer, middle, older]);
    }

    #[test]
    fn persists_across_reopen() {
        let path = std::env::temp_dir().join(format!("oneonone-db-{}.sqlite", Database::generate_game_id()));
        let path_str = path.to_str().unwrap().to_string();
        let id = {
            let db = Database::open(&path_str).unwrap();
            db.create(&sample_game(5)).unwrap()
        };
        let db = Database::open(&path_str).unwrap();
        assert_eq!(db.get(&id).unwrap().created_at, sample_game(5).created_at);
        drop(db);
        let _ = std::fs::remove_file(&path);
    }
}
