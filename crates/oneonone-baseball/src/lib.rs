// Matchup generation and fantasy scoring engine for one-on-one games.

pub mod draft;
pub mod eligibility;
pub mod matchup;
pub mod scoring;
pub mod service;

pub use matchup::{Board, Matchup};
pub use service::{FantasyService, ScoredGame, ServiceError, ServiceSettings};
