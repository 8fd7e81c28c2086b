use crate::props::Seasons;
use chrono::{Datelike, Local, NaiveDate};
use log::{LevelFilter, error};
use nfl_api::client::DEFAULT_BASE_URL;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub seasons: Seasons,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            seasons: Seasons::new(season_for_date(Local::now().date_naive())),
        }
    }
}

impl AppSettings {
    /// Defaults overridden by `PROPSLIP_API_URL`, `PROPSLIP_SEASON` and
    /// `PROPSLIP_LOG`. Rejected values are logged at error level, since the
    /// logger still runs at its startup filter when this is called.
    pub fn load() -> Self {
        let (settings, rejected) = Self::from_lookup(env_value);
        for message in rejected {
            error!("{message}");
        }
        settings
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut settings = Self::default();
        let mut rejected = Vec::new();

        if let Some(url) = lookup("PROPSLIP_API_URL") {
            settings.api_url = url;
        }

        if let Some(raw) = lookup("PROPSLIP_SEASON") {
            match raw.parse::<u16>() {
                Ok(season) => settings.seasons = Seasons::new(season),
                Err(_) => rejected.push(format!("ignoring PROPSLIP_SEASON={raw:?}, not a year")),
            }
        }

        if let Some(raw) = lookup("PROPSLIP_LOG") {
            match LevelFilter::from_str(&raw) {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => {
                    rejected.push(format!("ignoring PROPSLIP_LOG={raw:?}, not a log level"))
                }
            }
        }

        (settings, rejected)
    }
}

/// The NFL season a date belongs to. Games from January into the spring
/// count toward the season that started the previous September.
pub fn season_for_date(date: NaiveDate) -> u16 {
    let year = u16::try_from(date.year()).unwrap_or_default();
    if date.month() >= 9 { year } else { year.saturating_sub(1) }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_rolls_over_in_september() {
        assert_eq!(season_for_date(date(2024, 9, 5)), 2024);
        assert_eq!(season_for_date(date(2024, 12, 29)), 2024);
        assert_eq!(season_for_date(date(2025, 2, 9)), 2024);
        assert_eq!(season_for_date(date(2025, 8, 31)), 2024);
    }

    #[test]
    fn defaults_point_at_local_server() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_url, "http://localhost:3000");
        assert_eq!(settings.seasons.next, settings.seasons.current + 1);
        assert!(!settings.full_screen);
    }

    #[test]
    fn valid_overrides_are_applied() {
        let (settings, rejected) = AppSettings::from_lookup(|var| match var {
            "PROPSLIP_API_URL" => Some("http://stats.local".to_string()),
            "PROPSLIP_SEASON" => Some("2023".to_string()),
            "PROPSLIP_LOG" => Some("debug".to_string()),
            _ => None,
        });
        assert!(rejected.is_empty());
        assert_eq!(settings.api_url, "http://stats.local");
        assert_eq!(settings.seasons.current, 2023);
        assert_eq!(settings.seasons.next, 2024);
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn bad_overrides_are_reported_and_ignored() {
        let (settings, rejected) = AppSettings::from_lookup(|var| match var {
            "PROPSLIP_SEASON" => Some("next year".to_string()),
            "PROPSLIP_LOG" => Some("loud".to_string()),
            _ => None,
        });
        assert_eq!(rejected.len(), 2);
        assert!(rejected[0].contains("PROPSLIP_SEASON"));
        assert!(rejected[1].contains("PROPSLIP_LOG"));
        assert_eq!(settings.seasons, AppSettings::default().seasons);
        assert_eq!(settings.log_level, None);
    }
}
