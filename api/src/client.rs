use crate::wire::{GameLogsPayload, WireGameLog};
use crate::{GameRecord, SeasonType};
use log::debug;
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const GAME_LOGS_PATH: &str = "/api/nfl/game-logs";

/// Client for the player game-log endpoint.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NflApi {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("propslip/0.1 (terminal prop dashboard)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every game-log row for a player, optionally hinting a season.
    ///
    /// When `PROPSLIP_GAME_LOGS_JSON` points at a file, rows are read from it
    /// instead of the network. Row order is whatever the source chose; callers
    /// sort before windowing.
    pub async fn fetch_game_logs(
        &self,
        player_id: &str,
        season: Option<u16>,
    ) -> ApiResult<Vec<GameRecord>> {
        if let Ok(path) = std::env::var("PROPSLIP_GAME_LOGS_JSON")
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}")))?;
            return parse_game_logs(&content)
                .map_err(|e| ApiError::Other(format!("invalid game log json at {path}: {e}")));
        }

        let url = self.game_logs_url(player_id, season)?;
        debug!("fetching game logs from {url}");
        let payload: GameLogsPayload = self.get(url.as_str()).await?;
        Ok(payload.into_rows().iter().map(map_game_log).collect())
    }

    fn game_logs_url(&self, player_id: &str, season: Option<u16>) -> ApiResult<Url> {
        let mut params = vec![("playerId", player_id.to_string())];
        if let Some(season) = season {
            params.push(("season", season.to_string()));
        }
        let base = format!("{}{GAME_LOGS_PATH}", self.base_url);
        Url::parse_with_params(&base, &params)
            .map_err(|e| ApiError::Other(format!("bad game log url {base}: {e}")))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

/// Parse a game-log document (envelope or bare array) into domain records.
pub fn parse_game_logs(json: &str) -> Result<Vec<GameRecord>, serde_json::Error> {
    let payload: GameLogsPayload = serde_json::from_str(json)?;
    Ok(payload.into_rows().iter().map(map_game_log).collect())
}

// ---------------------------------------------------------------------------
// Mapping: wire rows → clean domain types
// ---------------------------------------------------------------------------

fn map_game_log(row: &WireGameLog) -> GameRecord {
    let stat = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);

    GameRecord {
        week: row.week.unwrap_or_default(),
        season: row.season.unwrap_or_default(),
        season_type: row
            .season_type
            .as_deref()
            .map(SeasonType::from_code)
            .unwrap_or_default(),
        opponent: row.opponent.clone().unwrap_or_default(),
        result: row
            .game_result
            .clone()
            .filter(|r| !r.trim().is_empty() && r != "N/A"),
        completions: stat(row.completions),
        attempts: stat(row.attempts),
        passing_yards: stat(row.passing_yards),
        passing_tds: stat(row.passing_tds),
        interceptions: stat(row.interceptions),
        sacks: stat(row.sacks),
        carries: stat(row.carries),
        rushing_yards: stat(row.rushing_yards),
        rushing_tds: stat(row.rushing_tds),
        receptions: stat(row.receptions),
        targets: stat(row.targets),
        receiving_yards: stat(row.receiving_yards),
        receiving_tds: stat(row.receiving_tds),
        fantasy_points: stat(row.fantasy_points),
        fantasy_points_ppr: stat(row.fantasy_points_ppr),
    }
}
