// Sportradar MLB v7 adapter for the StatProvider trait.
//
// Endpoints used:
//   games/{yyyy}/{mm}/{dd}/summary.json   rosters, lineups, player box lines
//   games/{yyyy}/{mm}/{dd}/boxscore.json  pairings, probable pitchers, line scores
//   games/{id}/summary.json               one game's box score
//   players/{id}/profile.json             single player lookup

pub mod wire;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use oneonone_core::config::Config;
use oneonone_core::model::{
    DaySchedule, DayStatistics, GameBoxScore, LightDaySchedule, PlayerRecord, Scoreboard,
};
use oneonone_core::provider::{ProviderError, StatProvider};
use serde::de::DeserializeOwned;
use tracing::{debug, info_span, warn, Instrument};

use self::wire::{DailyResponse, GameEnvelope, ProfileResponse};

pub struct SportradarClient {
    http: reqwest::Client,
    /// `{base_url}/{access_level}/v7/{language}`, no trailing slash.
    root: String,
    api_key: String,
}

impl SportradarClient {
    pub fn new(
        base_url: &str,
        access_level: &str,
        language: &str,
        api_key: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let root = format!(
            "{}/{}/v7/{}",
            base_url.trim_end_matches('/'),
            access_level,
            language
        );
        Ok(Self {
            http,
            root,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config
            .credentials
            .sportradar_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| {
                warn!("no Sportradar API key configured; requests will be rejected");
                String::new()
            });
        let p = &config.provider;
        Self::new(
            &p.base_url,
            &p.access_level,
            &p.language,
            api_key,
            Duration::from_secs(p.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.root, path)
    }

    fn daily_path(date: NaiveDate, file: &str) -> String {
        format!("games/{}/{}", date.format("%Y/%m/%d"), file)
    }

    /// GET a JSON document. The key travels as a query parameter and is
    /// kept out of every error and log line.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = self.endpoint(path);
        let span = info_span!("sportradar_get", %url);
        async {
            let response = self
                .http
                .get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .send()
                .await
                .map_err(|e| ProviderError::Transport {
                    url: url.clone(),
                    message: e.without_url().to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                warn!(status = status.as_u16(), "provider returned error status");
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }

            let body = response.text().await.map_err(|e| ProviderError::Transport {
                url: url.clone(),
                message: e.without_url().to_string(),
            })?;
            debug!(bytes = body.len(), "response received");

            serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl StatProvider for SportradarClient {
    async fn fetch_day_detail(&self, date: NaiveDate) -> Result<DaySchedule, ProviderError> {
        let resp: DailyResponse = self.get_json(&Self::daily_path(date, "summary.json")).await?;
        Ok(wire::into_day_schedule(resp, date))
    }

    async fn fetch_day_summary(&self, date: NaiveDate) -> Result<LightDaySchedule, ProviderError> {
        let resp: DailyResponse = self.get_json(&Self::daily_path(date, "boxscore.json")).await?;
        Ok(wire::into_light_schedule(resp, date))
    }

    async fn fetch_day_statistics(&self, date: NaiveDate) -> Result<DayStatistics, ProviderError> {
        let resp: DailyResponse = self.get_json(&Self::daily_path(date, "summary.json")).await?;
        Ok(wire::into_day_statistics(resp, date))
    }

    async fn fetch_player(&self, player_id: &str) -> Result<PlayerRecord, ProviderError> {
        let resp: ProfileResponse = self
            .get_json(&format!("players/{player_id}/profile.json"))
            .await?;
        Ok(resp.player.into())
    }

    async fn fetch_scoreboard(&self, date: NaiveDate) -> Result<Scoreboard, ProviderError> {
        let resp: DailyResponse = self.get_json(&Self::daily_path(date, "boxscore.json")).await?;
        Ok(wire::into_scoreboard(resp, date))
    }

    async fn fetch_box_score(&self, game_id: &str) -> Result<GameBoxScore, ProviderError> {
        let resp: GameEnvelope = self
            .get_json(&format!("games/{game_id}/summary.json"))
            .await?;
        Ok(wire::into_box_score(resp))
    }
}
