// Command-line surface: argument parsing and command dispatch.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use oneonone_baseball::draft::Side;
use oneonone_baseball::{Board, FantasyService, ServiceSettings};
use oneonone_core::config::Config;
use oneonone_core::db::Database;
use oneonone_core::model::{board_day_for, scoring_day_for, SLOT_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::render;
use crate::saved_board::SavedBoard;
use crate::sportradar::SportradarClient;

#[derive(Debug, Parser)]
#[command(name = "oneonone", version, about = "Head-to-head daily fantasy baseball")]
pub struct Cli {
    /// Directory holding config/ (created from defaults/ on first run)
    #[arg(long, env = "ONEONONE_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the draft board for a day
    Board {
        /// Day whose games supply the lineups (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Seed for the matchup draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Draft the board last shown by `board` and save the game
    Play {
        /// Ten choices, one per position in board order: `1` or `2`
        #[arg(long, value_delimiter = ',', required = true)]
        picks: Vec<String>,
        /// Redraw the board for this day instead of using the saved one
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Redraw the board with this seed instead of using the saved one
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List saved games, newest first
    History,
    /// Score a game once its scoring day is over
    Score { id: String },
    /// Look up a player profile
    Player { id: String },
    /// Real scores for a day
    Scores {
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Box score for one real game (ids are listed by `scores`)
    Game { id: String },
}

/// Today on the league's calendar. Lineups come from this day and probable
/// pitchers from tomorrow, the day a game drafted now is scored on.
pub fn default_board_day(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    board_day_for(now, tz)
}

/// The scoring day of a game drafted `now`, when a board for `day` would
/// draw its pitchers from some other day.
pub fn off_day_scoring(day: NaiveDate, now: DateTime<Utc>, tz: &Tz) -> Option<NaiveDate> {
    let scoring = scoring_day_for(now, tz);
    (day.succ_opt() != Some(scoring)).then_some(scoring)
}

fn warn_if_off_day(day: NaiveDate, now: DateTime<Utc>, tz: &Tz) {
    if let Some(scoring) = off_day_scoring(day, now, tz) {
        warn!(%day, %scoring, "board day does not lead into the scoring day");
        eprintln!(
            "note: pitchers for a {day} board pitch on {}, but a game drafted now is scored on {scoring}",
            day.succ_opt().map_or_else(|| "?".to_string(), |d| d.to_string())
        );
    }
}

/// Accepts `1,2,1,...` or a packed `1211221112`.
pub fn parse_picks(raw: &[String]) -> anyhow::Result<Vec<Side>> {
    let tokens: Vec<String> = match raw {
        [one] if one.chars().count() == SLOT_COUNT => one.chars().map(String::from).collect(),
        _ => raw.to_vec(),
    };
    let sides = tokens
        .iter()
        .map(|t| Side::parse(t).with_context(|| format!("invalid pick {t:?}; use 1 or 2")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if sides.len() != SLOT_COUNT {
        bail!("expected {SLOT_COUNT} picks, got {}", sides.len());
    }
    Ok(sides)
}

fn board_rng(seed: Option<u64>) -> (u64, StdRng) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, StdRng::seed_from_u64(seed))
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let db_path = config.db_path.to_string_lossy().into_owned();
    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let db = Database::open(&db_path).context("failed to open database")?;
    info!(path = %db_path, "database opened");

    let provider = SportradarClient::from_config(&config)?;
    let service = FantasyService::new(provider, db, ServiceSettings::from_config(&config));
    let tz = service.settings().timezone;
    let now = Utc::now();

    let saved_path = SavedBoard::path_for(&config.db_path);

    match cli.command {
        Command::Board { date, seed } => {
            let day = date.unwrap_or_else(|| default_board_day(now, &tz));
            warn_if_off_day(day, now, &tz);
            let (seed, mut rng) = board_rng(seed);
            let board = service.new_board(day, &mut rng).await?;
            print!("{}", render::board(day, &board));
            if let Some(matchups) = board.matchups() {
                println!("seed {seed}");
                if let Some(path) = &saved_path {
                    let saved = SavedBoard {
                        day,
                        seed,
                        matchups: matchups.to_vec(),
                    };
                    saved.save(path)?;
                }
            }
        }
        Command::Play { picks, date, seed } => {
            let sides = parse_picks(&picks)?;
            let saved = match &saved_path {
                Some(path) => SavedBoard::load(path)?,
                None => None,
            };
            let today = default_board_day(now, &tz);
            let (matchups, mut rng) = match (date, seed, saved) {
                (None, None, Some(saved)) if saved.day == today => {
                    info!(day = %saved.day, seed = saved.seed, "drafting saved board");
                    (saved.matchups, StdRng::from_entropy())
                }
                (None, None, Some(saved)) => bail!(
                    "the saved board is for {}; run `oneonone board` for {today}",
                    saved.day
                ),
                (None, None, None) => bail!("no board saved; run `oneonone board` first"),
                (date, seed, saved) => {
                    let day = date.unwrap_or(today);
                    warn_if_off_day(day, now, &tz);
                    let (seed, mut rng) = board_rng(seed);
                    let board = service.new_board(day, &mut rng).await?;
                    let Board::Ready(matchups) = board else {
                        print!("{}", render::board(day, &board));
                        return Ok(());
                    };
                    if saved.is_some_and(|s| s.diverges_from(day, seed, &matchups)) {
                        warn!(%day, seed, "redrawn board differs from the one shown");
                        eprintln!("note: the {day} board for seed {seed} changed since it was shown; drafting the new one");
                        print!("{}", render::board(day, &Board::Ready(matchups.clone())));
                    }
                    (matchups, rng)
                }
            };
            let id = service.draft_game(&matchups, &sides, &mut rng, now)?;
            let game = service.game(&id)?;
            print!("{}", render::game(&id, &game));
        }
        Command::History => {
            let games = service.history()?;
            print!("{}", render::history(&games, now, &tz));
        }
        Command::Score { id } => {
            let scored = service.score_game(&id, now).await?;
            print!("{}", render::scored(&scored));
        }
        Command::Player { id } => {
            let player = service.player(&id).await?;
            print!("{}", render::player(&player));
        }
        Command::Scores { date } => {
            let day = date.unwrap_or_else(|| now.with_timezone(&tz).date_naive());
            let board = service.scoreboard(day).await?;
            print!("{}", render::scoreboard(&board, &tz));
        }
        Command::Game { id } => {
            let box_score = service.box_score(&id).await?;
            print!("{}", render::box_score(&box_score, &tz));
        }
    }
    Ok(())
}
