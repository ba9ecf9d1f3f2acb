// Game record store contract: opaque-id keyed persistence of fantasy games.

use thiserror::Error;

use crate::model::FantasyGame;

/// Opaque identifier assigned by the store on create.
pub type GameId = String;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no fantasy game with id {0}")]
    NotFound(GameId),

    #[error("fantasy game {0} has already been scored")]
    AlreadyScored(GameId),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence for [`FantasyGame`] records.
pub trait GameRecordStore: Send + Sync {
    /// Persist a new record and return its id.
    fn create(&self, game: &FantasyGame) -> Result<GameId, StoreError>;

    fn get(&self, id: &str) -> Result<FantasyGame, StoreError>;

    /// Replace the record at `id`, but only while the stored record is still
    /// unscored. A record that is already scored is left untouched and
    /// [`StoreError::AlreadyScored`] is returned.
    fn update(&self, id: &str, game: &FantasyGame) -> Result<(), StoreError>;

    /// Every stored record, newest first.
    fn list(&self) -> Result<Vec<(GameId, FantasyGame)>, StoreError>;
}
