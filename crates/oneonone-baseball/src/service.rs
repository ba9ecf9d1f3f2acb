// Game lifecycle: build a board, persist a draft, settle it once the games
// have been played.

use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use oneonone_core::config::Config;
use oneonone_core::model::{
    board_day_for, FantasyGame, FinalScore, GameBoxScore, Outcome, PlayerRecord, Scoreboard,
    Selection,
};
use oneonone_core::provider::{ProviderError, StatProvider};
use oneonone_core::store::{GameId, GameRecordStore, StoreError};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::draft::{auto_draft, user_draft, validate_draft, DraftError, Side};
use crate::eligibility::valid_teams;
use crate::matchup::{generate_matchups, Board, Matchup};
use crate::scoring::score_draft;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid {side} draft: {source}")]
    InvalidDraft {
        side: &'static str,
        source: DraftError,
    },

    #[error("fantasy game {id} cannot be scored until {scoring_day} is over")]
    NotSettled { id: GameId, scoring_day: NaiveDate },

    #[error("fantasy game {0} has already been scored")]
    AlreadyScored(GameId),
}

impl ServiceError {
    /// Whether the caller may simply re-issue the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Provider(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// Knobs for [`FantasyService`].
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Pause between the two adjacent-day fetches of a new board.
    pub rate_limit_pause: Duration,
    pub max_draw_attempts: usize,
    /// Time zone the provider's schedule dates are expressed in.
    pub timezone: Tz,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            rate_limit_pause: Duration::from_millis(1500),
            max_draw_attempts: 1000,
            timezone: Tz::America__New_York,
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        ServiceSettings {
            rate_limit_pause: config.rate_limit_pause(),
            max_draw_attempts: config.matchups.max_draw_attempts,
            timezone: config.timezone(),
        }
    }
}

/// A game after settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGame {
    pub id: GameId,
    pub game: FantasyGame,
    pub outcome: Outcome,
}

/// Orchestrates the stat provider and the game store. Holds no mutable
/// state; every call is self-contained.
pub struct FantasyService<P, S> {
    provider: P,
    store: S,
    settings: ServiceSettings,
}

impl<P: StatProvider, S: GameRecordStore> FantasyService<P, S> {
    pub fn new(provider: P, store: S, settings: ServiceSettings) -> Self {
        Self {
            provider,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lineup day for a board drafted at `now`: the next day's probable
    /// pitchers then start on the scoring day of the game drafted from it.
    pub fn board_day(&self, now: DateTime<Utc>) -> NaiveDate {
        board_day_for(now, &self.settings.timezone)
    }

    /// Build a draft board from teams that play on `day` and again the day
    /// after.
    ///
    /// Fetches the full detail for `day`, waits the configured pause, then
    /// fetches the summary for the following day. "No game available" and
    /// an unsatisfiable pool are reported through [`Board`], not as errors.
    pub async fn new_board<R: Rng + ?Sized>(
        &self,
        day: NaiveDate,
        rng: &mut R,
    ) -> Result<Board, ServiceError> {
        debug!(%day, "fetching day detail");
        let detail = self.provider.fetch_day_detail(day).await?;

        tokio::time::sleep(self.settings.rate_limit_pause).await;

        let next_day = day + Days::new(1);
        debug!(%next_day, "fetching next-day summary");
        let summary = self.provider.fetch_day_summary(next_day).await?;

        let teams = valid_teams(&detail, &summary);
        let board = generate_matchups(&teams, rng, self.settings.max_draw_attempts);
        match &board {
            Board::Ready(m) => info!(%day, pool = teams.len(), matchups = m.len(), "board ready"),
            Board::NoGameAvailable => info!(%day, pool = teams.len(), "no game available"),
            Board::Unsatisfiable { position, attempts } => {
                warn!(%day, pool = teams.len(), position, attempts, "board unsatisfiable")
            }
        }
        Ok(board)
    }

    /// Persist a freshly drafted game and return its id.
    pub fn create_game(
        &self,
        user_picks: Vec<Selection>,
        opponent_picks: Vec<Selection>,
        created_at: DateTime<Utc>,
    ) -> Result<GameId, ServiceError> {
        validate_draft(&user_picks).map_err(|source| ServiceError::InvalidDraft {
            side: "user",
            source,
        })?;
        validate_draft(&opponent_picks).map_err(|source| ServiceError::InvalidDraft {
            side: "opponent",
            source,
        })?;

        let game = FantasyGame::drafted(user_picks, opponent_picks, created_at);
        let id = self.store.create(&game)?;
        info!(game_id = %id, created_at = %created_at, "fantasy game created");
        Ok(id)
    }

    /// Draft the user's chosen sides, auto-draft the opponent, and persist.
    pub fn draft_game<R: Rng + ?Sized>(
        &self,
        matchups: &[Matchup],
        sides: &[Side],
        rng: &mut R,
        created_at: DateTime<Utc>,
    ) -> Result<GameId, ServiceError> {
        let user = user_draft(matchups, sides).map_err(|source| ServiceError::InvalidDraft {
            side: "user",
            source,
        })?;
        let opponent = auto_draft(matchups, rng);
        self.create_game(user, opponent, created_at)
    }

    /// Settle a drafted game from its scoring day's statistics.
    ///
    /// Rejects games that are already scored and games whose scoring day
    /// has not finished as of `now`. The write back is a compare-and-set:
    /// if another caller scored the game in the meantime this returns
    /// [`ServiceError::AlreadyScored`] and the stored record is unchanged.
    pub async fn score_game(&self, id: &str, now: DateTime<Utc>) -> Result<ScoredGame, ServiceError> {
        let game = self.store.get(id)?;
        if game.is_scored() {
            return Err(ServiceError::AlreadyScored(id.to_string()));
        }

        let tz = self.settings.timezone;
        let scoring_day = game.scoring_day(&tz);
        if !game.is_settled(now, &tz) {
            return Err(ServiceError::NotSettled {
                id: id.to_string(),
                scoring_day,
            });
        }

        debug!(game_id = %id, %scoring_day, "fetching scoring-day statistics");
        let stats = self.provider.fetch_day_statistics(scoring_day).await?;

        let user = score_draft(&stats, &game.user_picks);
        let opponent = score_draft(&stats, &game.opponent_picks);
        let scored = FantasyGame {
            user_picks: user.selections,
            opponent_picks: opponent.selections,
            created_at: game.created_at,
            result: Some(FinalScore {
                user: user.total,
                opponent: opponent.total,
            }),
        };

        self.store.update(id, &scored).map_err(|e| match e {
            StoreError::AlreadyScored(id) => ServiceError::AlreadyScored(id),
            other => ServiceError::Store(other),
        })?;

        let outcome = Outcome::from_totals(user.total, opponent.total);
        info!(
            game_id = %id,
            user_total = user.total,
            opponent_total = opponent.total,
            outcome = %outcome,
            "fantasy game scored"
        );
        Ok(ScoredGame {
            id: id.to_string(),
            game: scored,
            outcome,
        })
    }

    /// Every stored game, newest first.
    pub fn history(&self) -> Result<Vec<(GameId, FantasyGame)>, ServiceError> {
        Ok(self.store.list()?)
    }

    pub fn game(&self, id: &str) -> Result<FantasyGame, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Whether a stored game is ready to be scored as of `now`.
    pub fn is_settled(&self, game: &FantasyGame, now: DateTime<Utc>) -> bool {
        game.is_settled(now, &self.settings.timezone)
    }

    pub async fn player(&self, player_id: &str) -> Result<PlayerRecord, ServiceError> {
        Ok(self.provider.fetch_player(player_id).await?)
    }

    pub async fn scoreboard(&self, day: NaiveDate) -> Result<Scoreboard, ServiceError> {
        let board = self.provider.fetch_scoreboard(day).await?;
        debug!(%day, games = board.games.len(), "scoreboard fetched");
        Ok(board)
    }

    pub async fn box_score(&self, game_id: &str) -> Result<GameBoxScore, ServiceError> {
        Ok(self.provider.fetch_box_score(game_id).await?)
    }
}
