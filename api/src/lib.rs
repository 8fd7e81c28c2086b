pub mod client;
pub mod reference;
pub mod wire;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the endpoint wire format
// ---------------------------------------------------------------------------

/// Regular season vs. postseason. Tracked per game and displayed separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    #[default]
    Regular,
    Post,
}

impl SeasonType {
    /// Parse the nflverse season code. Anything other than "POST" is treated
    /// as a regular season game.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("POST") {
            SeasonType::Post
        } else {
            SeasonType::Regular
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SeasonType::Regular => "REG",
            SeasonType::Post => "POST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeasonType::Regular => "Regular Season",
            SeasonType::Post => "Playoffs",
        }
    }
}

/// One player-game observation. Counting stats are zero when the upstream row
/// left them out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub week: u8,
    pub season: u16,
    pub season_type: SeasonType,
    pub opponent: String,
    pub result: Option<String>,
    // Passing
    pub completions: f64,
    pub attempts: f64,
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub interceptions: f64,
    pub sacks: f64,
    // Rushing
    pub carries: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    // Receiving
    pub receptions: f64,
    pub targets: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    // Fantasy
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
}

impl GameRecord {
    pub fn is_postseason(&self) -> bool {
        self.season_type == SeasonType::Post
    }
}

/// Team metadata from the static reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub abbr: String,
    pub name: String,     // "Kansas City Chiefs"
    pub nickname: String, // "Chiefs"
    pub conference: String,
    pub division: String, // "AFC West"
    pub color: Option<String>,
    pub logo_url: Option<String>,
}

/// A roster entry. Height is stored in inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub player_id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub team: String,
    pub position: String,
    pub jersey_number: Option<u8>,
    pub height: Option<u16>,
    pub weight: Option<u16>,
    pub age: Option<f32>,
    pub years_exp: Option<u8>,
    pub headshot_url: Option<String>,
}

impl RosterPlayer {
    /// `6' 2"` style height, or `--` when unknown.
    pub fn height_display(&self) -> String {
        match self.height {
            Some(inches) => format!("{}' {}\"", inches / 12, inches % 12),
            None => "--".to_string(),
        }
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}
