// Configuration loading and parsing (app.toml, credentials.toml).

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub matchups: MatchupConfig,
    pub league: LeagueConfig,
    pub credentials: CredentialsConfig,
    pub db_path: PathBuf,
}

impl Config {
    /// Pause inserted between two fetches that target adjacent days.
    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_millis(self.provider.rate_limit_pause_ms)
    }

    /// League time zone. Validated at load time.
    pub fn timezone(&self) -> Tz {
        self.league.timezone.parse().unwrap_or(Tz::America__New_York)
    }
}

// ---------------------------------------------------------------------------
// app.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire app.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AppFile {
    provider: ProviderConfig,
    #[serde(default)]
    matchups: MatchupConfig,
    #[serde(default)]
    league: LeagueConfig,
    #[serde(default)]
    database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default = "default_access_level")]
    pub access_level: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_rate_limit_pause_ms")]
    pub rate_limit_pause_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchupConfig {
    /// Upper bound on pair draws per slot before the board is declared
    /// unsatisfiable.
    #[serde(default = "default_max_draw_attempts")]
    pub max_draw_attempts: usize,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        MatchupConfig {
            max_draw_attempts: default_max_draw_attempts(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// IANA time zone used to turn timestamps into schedule dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            timezone: default_timezone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatabaseSection {
    /// Empty means "use the platform data directory".
    #[serde(default)]
    path: String,
}

fn default_access_level() -> String {
    "trial".into()
}

fn default_language() -> String {
    "en".into()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_rate_limit_pause_ms() -> u64 {
    1500
}

fn default_max_draw_attempts() -> usize {
    1000
}

fn default_timezone() -> String {
    "America/New_York".into()
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub sportradar_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/app.toml` and (optionally)
/// `config/credentials.toml`, both relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- app.toml (required) ---
    let app_path = config_dir.join("app.toml");
    let app_text = read_file(&app_path)?;
    let app_file: AppFile = toml::from_str(&app_text).map_err(|e| ConfigError::ParseError {
        path: app_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let db_path = resolve_db_path(base_dir, &app_file.database.path)?;

    let config = Config {
        provider: app_file.provider,
        matchups: app_file.matchups,
        league: app_file.league,
        credentials,
        db_path,
    };

    validate(&config)?;

    Ok(config)
}

/// Files seeded from `defaults/` on first run. The credentials file is never
/// seeded; `credentials.toml.example` shows its one key.
const SEEDED_FILES: &[&str] = &["app.toml"];

/// Copy any missing seeded file from `defaults/` into `config/` and return
/// the paths written. A base directory with neither directory is an error.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let copy_error = |message: String| ConfigError::DefaultsCopyError { message };

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(vec![]);
        }
        return Err(copy_error(format!(
            "neither defaults/ nor config/ found in {}; pass --config-dir",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create {}: {e}", config_dir.display())))?;

    let mut copied = Vec::new();
    for name in SEEDED_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() || !source.is_file() {
            continue;
        }
        std::fs::copy(&source, &target)
            .map_err(|e| copy_error(format!("failed to copy {}: {e}", source.display())))?;
        info!(path = %target.display(), "seeded config from defaults");
        copied.push(target);
    }

    if !config_dir.join("credentials.toml").exists() {
        warn!("config/credentials.toml missing; Sportradar requests will be rejected");
    }

    Ok(copied)
}

/// Load config relative to `base_dir`, copying defaults first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn resolve_db_path(base_dir: &Path, configured: &str) -> Result<PathBuf, ConfigError> {
    if configured == ":memory:" {
        return Ok(PathBuf::from(configured));
    }
    if !configured.is_empty() {
        let path = PathBuf::from(configured);
        return Ok(if path.is_absolute() { path } else { base_dir.join(path) });
    }
    let dirs = directories::ProjectDirs::from("", "", "oneonone").ok_or_else(|| {
        ConfigError::ValidationError {
            field: "database.path".into(),
            message: "no home directory available; set an explicit path".into(),
        }
    })?;
    Ok(dirs.data_dir().join("oneonone.db"))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.provider.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "provider.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.provider.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "provider.request_timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    if config.matchups.max_draw_attempts == 0 {
        return Err(ConfigError::ValidationError {
            field: "matchups.max_draw_attempts".into(),
            message: "must be > 0".into(),
        });
    }

    if config.league.timezone.parse::<Tz>().is_err() {
        return Err(ConfigError::ValidationError {
            field: "league.timezone".into(),
            message: format!("unknown time zone `{}`", config.league.timezone),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
