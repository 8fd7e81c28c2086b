pub mod aggregator;
pub mod calculator;
pub mod line;

pub use aggregator::{NormalizedPoint, extract_values};
pub use calculator::{Direction, Seasons, Stats, TimeFrame, compute_stats};
pub use line::{LineRange, TrackMarkers, snap_line_value};

use log::warn;
use nfl_api::GameRecord;

/// The closed set of supported prop statistics. `Unsupported` stands in for
/// any key outside the table and resolves to 0 for every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropType {
    PassingYards,
    PassingTd,
    RushingYards,
    RushingTd,
    Completions,
    Attempts,
    Interceptions,
    Sacks,
    ReceivingYards,
    ReceivingTd,
    Receptions,
    Targets,
    TotalYards,
    TotalTd,
    Unsupported,
}

impl PropType {
    pub const SUPPORTED: [PropType; 14] = [
        PropType::PassingYards,
        PropType::PassingTd,
        PropType::RushingYards,
        PropType::RushingTd,
        PropType::Completions,
        PropType::Attempts,
        PropType::Interceptions,
        PropType::Sacks,
        PropType::ReceivingYards,
        PropType::ReceivingTd,
        PropType::Receptions,
        PropType::Targets,
        PropType::TotalYards,
        PropType::TotalTd,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PropType::PassingYards => "passing_yards",
            PropType::PassingTd => "passing_td",
            PropType::RushingYards => "rushing_yards",
            PropType::RushingTd => "rushing_td",
            PropType::Completions => "completions",
            PropType::Attempts => "attempts",
            PropType::Interceptions => "interceptions",
            PropType::Sacks => "sacks",
            PropType::ReceivingYards => "receiving_yards",
            PropType::ReceivingTd => "receiving_td",
            PropType::Receptions => "receptions",
            PropType::Targets => "targets",
            PropType::TotalYards => "total_yards",
            PropType::TotalTd => "total_td",
            PropType::Unsupported => "unsupported",
        }
    }

    /// Resolve a prop key. Unknown keys become `Unsupported` rather than an
    /// error.
    pub fn from_key(key: &str) -> Self {
        let found = Self::SUPPORTED.iter().copied().find(|p| p.key() == key);
        found.unwrap_or_else(|| {
            warn!("unsupported prop type {key:?}, stats will read as zero");
            PropType::Unsupported
        })
    }

    /// The statistic this prop counts for one game. Derived props sum their
    /// two source fields.
    pub fn value_for(&self, record: &GameRecord) -> f64 {
        match self {
            PropType::PassingYards => record.passing_yards,
            PropType::PassingTd => record.passing_tds,
            PropType::RushingYards => record.rushing_yards,
            PropType::RushingTd => record.rushing_tds,
            PropType::Completions => record.completions,
            PropType::Attempts => record.attempts,
            PropType::Interceptions => record.interceptions,
            PropType::Sacks => record.sacks,
            PropType::ReceivingYards => record.receiving_yards,
            PropType::ReceivingTd => record.receiving_tds,
            PropType::Receptions => record.receptions,
            PropType::Targets => record.targets,
            PropType::TotalYards => record.passing_yards + record.rushing_yards,
            PropType::TotalTd => record.passing_tds + record.rushing_tds,
            PropType::Unsupported => 0.0,
        }
    }
}

/// A prop button offered on a player's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropOption {
    pub label: &'static str,
    pub key: &'static str,
}

impl PropOption {
    const fn new(label: &'static str, key: &'static str) -> Self {
        Self { label, key }
    }

    pub fn prop_type(&self) -> PropType {
        PropType::from_key(self.key)
    }
}

const QB_PROPS: [PropOption; 10] = [
    PropOption::new("Pass Yds", "passing_yards"),
    PropOption::new("Pass TD", "passing_td"),
    PropOption::new("Rush Yds", "rushing_yards"),
    PropOption::new("Rush TD", "rushing_td"),
    PropOption::new("Completions", "completions"),
    PropOption::new("Attempts", "attempts"),
    PropOption::new("INT", "interceptions"),
    PropOption::new("Sacks", "sacks"),
    PropOption::new("Pass + Rush Yds", "total_yards"),
    PropOption::new("Pass + Rush TD", "total_td"),
];

// "Rush Att" has no entry in the prop table and reads as zero.
const RB_PROPS: [PropOption; 8] = [
    PropOption::new("Rush Yds", "rushing_yards"),
    PropOption::new("Rush TD", "rushing_td"),
    PropOption::new("Rush Att", "rushing_attempts"),
    PropOption::new("Rec Yds", "receiving_yards"),
    PropOption::new("Rec TD", "receiving_td"),
    PropOption::new("Receptions", "receptions"),
    PropOption::new("Total Yds", "total_yards"),
    PropOption::new("Total TD", "total_td"),
];

const RECEIVER_PROPS: [PropOption; 4] = [
    PropOption::new("Rec Yds", "receiving_yards"),
    PropOption::new("Rec TD", "receiving_td"),
    PropOption::new("Receptions", "receptions"),
    PropOption::new("Targets", "targets"),
];

pub fn props_for_position(position: &str) -> &'static [PropOption] {
    match position {
        "QB" => &QB_PROPS,
        "RB" => &RB_PROPS,
        "WR" | "TE" => &RECEIVER_PROPS,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_the_table() {
        for prop in PropType::SUPPORTED {
            assert_eq!(PropType::from_key(prop.key()), prop);
        }
    }

    #[test]
    fn unknown_key_is_unsupported() {
        assert_eq!(PropType::from_key("rushing_attempts"), PropType::Unsupported);
        assert_eq!(PropType::from_key(""), PropType::Unsupported);
    }

    #[test]
    fn derived_props_sum_their_fields() {
        let record = GameRecord {
            passing_yards: 215.0,
            rushing_yards: 32.0,
            passing_tds: 2.0,
            rushing_tds: 1.0,
            ..Default::default()
        };
        assert_eq!(PropType::TotalYards.value_for(&record), 247.0);
        assert_eq!(PropType::TotalTd.value_for(&record), 3.0);
        assert_eq!(PropType::Unsupported.value_for(&record), 0.0);
    }

    #[test]
    fn position_menus() {
        assert_eq!(props_for_position("QB").len(), 10);
        assert_eq!(props_for_position("TE")[0].label, "Rec Yds");
        assert!(props_for_position("K").is_empty());
        let rush_att = props_for_position("RB")
            .iter()
            .find(|p| p.label == "Rush Att")
            .unwrap();
        assert_eq!(rush_att.prop_type(), PropType::Unsupported);
    }
}
