//! Raw wire types: serde shapes for the game-log endpoint and the reference
//! tables. These map to the clean domain types via the mapping fns in
//! client.rs and reference.rs.
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Game logs  (GET /api/nfl/game-logs?playerId=..)
// ---------------------------------------------------------------------------

/// The endpoint answers either with an envelope carrying `gameLogs` or with a
/// bare array of rows.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum GameLogsPayload {
    Envelope(GameLogsResponse),
    Rows(Vec<WireGameLog>),
}

impl Default for GameLogsPayload {
    fn default() -> Self {
        GameLogsPayload::Rows(Vec::new())
    }
}

impl GameLogsPayload {
    pub fn into_rows(self) -> Vec<WireGameLog> {
        match self {
            GameLogsPayload::Envelope(resp) => resp.game_logs.unwrap_or_default(),
            GameLogsPayload::Rows(rows) => rows,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameLogsResponse {
    pub player_id: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub season: Option<u16>,
    pub game_logs: Option<Vec<WireGameLog>>,
    #[serde(default, deserialize_with = "whole_number")]
    pub total: Option<u32>,
}

/// Numeric columns arrive as JSON numbers, sometimes floats (nflverse), and
/// are nullable.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireGameLog {
    #[serde(default, deserialize_with = "whole_number")]
    pub week: Option<u8>,
    #[serde(default, deserialize_with = "whole_number")]
    pub season: Option<u16>,
    pub season_type: Option<String>, // "REG" | "POST"
    pub opponent: Option<String>,
    pub game_result: Option<String>, // "W 27-20", or "N/A"
    pub completions: Option<f64>,
    pub attempts: Option<f64>,
    pub passing_yards: Option<f64>,
    pub passing_tds: Option<f64>,
    pub interceptions: Option<f64>,
    pub sacks: Option<f64>,
    pub carries: Option<f64>,
    pub rushing_yards: Option<f64>,
    pub rushing_tds: Option<f64>,
    pub receptions: Option<f64>,
    pub targets: Option<f64>,
    pub receiving_yards: Option<f64>,
    pub receiving_tds: Option<f64>,
    pub fantasy_points: Option<f64>,
    pub fantasy_points_ppr: Option<f64>,
}

// ---------------------------------------------------------------------------
// Reference tables  (nflverse team descriptions / seasonal rosters)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub team_abbr: String,
    pub team_name: Option<String>,
    pub team_nick: Option<String>,
    pub team_conf: Option<String>,
    pub team_division: Option<String>,
    pub team_color: Option<String>,
    pub team_logo_espn: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRosterPlayer {
    pub player_id: String,
    pub player_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub jersey_number: Option<u8>,
    #[serde(default, deserialize_with = "whole_number")]
    pub height: Option<u16>,
    #[serde(default, deserialize_with = "whole_number")]
    pub weight: Option<u16>,
    pub age: Option<f32>,
    #[serde(default, deserialize_with = "whole_number")]
    pub years_exp: Option<u8>,
    pub headshot_url: Option<String>,
}

/// Integer columns exported through pandas come out as `15.0`. Accept any JSON
/// number and keep it only when it is a whole value that fits the target type.
fn whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .and_then(|v| T::try_from(v as i64).ok()))
}
