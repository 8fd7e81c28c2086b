use crate::props::calculator::round_tenth;
use nfl_api::GameRecord;

/// Column block shown in the game-log table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Passing,
    Rushing,
    Receiving,
}

impl StatGroup {
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            StatGroup::Passing => &["CMP", "ATT", "YDS", "CMP%", "YPA", "TD", "INT"],
            StatGroup::Rushing => &["CAR", "YDS", "YPC", "TD"],
            StatGroup::Receiving => &["REC", "YDS", "YPR", "TD"],
        }
    }

    pub fn cells(&self, row: &GameLogRow) -> Vec<String> {
        let r = &row.record;
        match self {
            StatGroup::Passing => vec![
                whole(r.completions),
                whole(r.attempts),
                whole(r.passing_yards),
                format!("{:.1}%", row.completion_pct),
                format!("{:.1}", row.yards_per_attempt),
                whole(r.passing_tds),
                whole(r.interceptions),
            ],
            StatGroup::Rushing => vec![
                whole(r.carries),
                whole(r.rushing_yards),
                format!("{:.1}", row.yards_per_carry),
                whole(r.rushing_tds),
            ],
            StatGroup::Receiving => vec![
                whole(r.receptions),
                whole(r.receiving_yards),
                format!("{:.1}", row.yards_per_reception),
                whole(r.receiving_tds),
            ],
        }
    }
}

/// QB gets passing and rushing, RB rushing and receiving, WR/TE receiving.
pub fn stat_groups(position: &str) -> Vec<StatGroup> {
    let mut groups = Vec::with_capacity(2);
    if position == "QB" {
        groups.push(StatGroup::Passing);
    }
    if matches!(position, "QB" | "RB") {
        groups.push(StatGroup::Rushing);
    }
    if matches!(position, "RB" | "WR" | "TE") {
        groups.push(StatGroup::Receiving);
    }
    groups
}

/// Seasons offered in the game-log season picker, newest first.
pub fn season_options(current: u16) -> [u16; 3] {
    [current, current.saturating_sub(1), current.saturating_sub(2)]
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameLogRow {
    pub record: GameRecord,
    pub completion_pct: f64,
    pub yards_per_attempt: f64,
    pub yards_per_carry: f64,
    pub yards_per_reception: f64,
}

impl GameLogRow {
    pub fn new(record: GameRecord) -> Self {
        Self {
            completion_pct: ratio(record.completions * 100.0, record.attempts),
            yards_per_attempt: ratio(record.passing_yards, record.attempts),
            yards_per_carry: ratio(record.rushing_yards, record.carries),
            yards_per_reception: ratio(record.receiving_yards, record.receptions),
            record,
        }
    }

    pub fn result(&self) -> &str {
        self.record.result.as_deref().unwrap_or("-")
    }
}

/// One season of games, regular season first and playoffs after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLogTable {
    pub season: u16,
    pub regular: Vec<GameLogRow>,
    pub playoffs: Vec<GameLogRow>,
}

impl GameLogTable {
    pub fn build(records: &[GameRecord], season: u16) -> Self {
        let mut games: Vec<&GameRecord> = records.iter().filter(|r| r.season == season).collect();
        games.sort_by_key(|r| r.week);

        let (playoffs, regular): (Vec<&GameRecord>, Vec<&GameRecord>) =
            games.into_iter().partition(|r| r.is_postseason());

        Self {
            season,
            regular: regular.into_iter().cloned().map(GameLogRow::new).collect(),
            playoffs: playoffs.into_iter().cloned().map(GameLogRow::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.playoffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regular.len() + self.playoffs.len()
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round_tenth(numerator / denominator)
    } else {
        0.0
    }
}

fn whole(value: f64) -> String {
    format!("{value:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfl_api::SeasonType;

    fn game(week: u8, season: u16, season_type: SeasonType) -> GameRecord {
        GameRecord {
            week,
            season,
            season_type,
            completions: 20.0,
            attempts: 30.0,
            passing_yards: 250.0,
            carries: 4.0,
            rushing_yards: 18.0,
            ..Default::default()
        }
    }

    #[test]
    fn splits_regular_and_playoffs_in_week_order() {
        let records = vec![
            game(20, 2024, SeasonType::Post),
            game(3, 2024, SeasonType::Regular),
            game(1, 2024, SeasonType::Regular),
            game(2, 2023, SeasonType::Regular),
            game(19, 2024, SeasonType::Post),
        ];
        let table = GameLogTable::build(&records, 2024);
        let regular: Vec<u8> = table.regular.iter().map(|r| r.record.week).collect();
        let playoffs: Vec<u8> = table.playoffs.iter().map(|r| r.record.week).collect();
        assert_eq!(regular, vec![1, 3]);
        assert_eq!(playoffs, vec![19, 20]);
        assert_eq!(table.len(), 4);
        assert!(GameLogTable::build(&records, 2022).is_empty());
    }

    #[test]
    fn derived_columns() {
        let row = GameLogRow::new(game(1, 2024, SeasonType::Regular));
        assert_eq!(row.completion_pct, 66.7);
        assert_eq!(row.yards_per_attempt, 8.3);
        assert_eq!(row.yards_per_carry, 4.5);
        assert_eq!(row.yards_per_reception, 0.0);
        assert_eq!(row.result(), "-");
    }

    #[test]
    fn groups_by_position() {
        assert_eq!(stat_groups("QB"), vec![StatGroup::Passing, StatGroup::Rushing]);
        assert_eq!(stat_groups("RB"), vec![StatGroup::Rushing, StatGroup::Receiving]);
        assert_eq!(stat_groups("TE"), vec![StatGroup::Receiving]);
        assert!(stat_groups("K").is_empty());
    }

    #[test]
    fn cells_line_up_with_headers() {
        let row = GameLogRow::new(game(1, 2024, SeasonType::Regular));
        for group in [StatGroup::Passing, StatGroup::Rushing, StatGroup::Receiving] {
            assert_eq!(group.cells(&row).len(), group.headers().len());
        }
        assert_eq!(StatGroup::Passing.cells(&row)[3], "66.7%");
    }

    #[test]
    fn season_picker_goes_back_two_years() {
        assert_eq!(season_options(2024), [2024, 2023, 2022]);
    }
}
