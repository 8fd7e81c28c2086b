use crate::props::NormalizedPoint;

/// Historical window a line is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Last5,
    Last10,
    Last20,
    #[default]
    SeasonCurrent,
    SeasonNext,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 5] = [
        TimeFrame::Last5,
        TimeFrame::Last10,
        TimeFrame::Last20,
        TimeFrame::SeasonCurrent,
        TimeFrame::SeasonNext,
    ];

    /// Size of the recency slice, `None` for whole-season frames.
    pub fn recent_games(&self) -> Option<usize> {
        match self {
            TimeFrame::Last5 => Some(5),
            TimeFrame::Last10 => Some(10),
            TimeFrame::Last20 => Some(20),
            TimeFrame::SeasonCurrent | TimeFrame::SeasonNext => None,
        }
    }

    pub fn season(&self, seasons: Seasons) -> u16 {
        match self {
            TimeFrame::SeasonNext => seasons.next,
            _ => seasons.current,
        }
    }

    pub fn label(&self, seasons: Seasons) -> String {
        match self {
            TimeFrame::Last5 => "L5".to_string(),
            TimeFrame::Last10 => "L10".to_string(),
            TimeFrame::Last20 => "L20".to_string(),
            TimeFrame::SeasonCurrent | TimeFrame::SeasonNext => self.season(seasons).to_string(),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Over,
    Under,
}

impl Direction {
    pub fn toggle(self) -> Self {
        match self {
            Direction::Over => Direction::Under,
            Direction::Under => Direction::Over,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Over => "OVER",
            Direction::Under => "UNDER",
        }
    }

    /// Strict comparison: a value equal to the line never hits.
    pub fn hits(&self, value: f64, line: f64) -> bool {
        match self {
            Direction::Over => value > line,
            Direction::Under => value < line,
        }
    }
}

/// The seasons the season-scoped frames resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seasons {
    pub current: u16,
    pub next: u16,
}

impl Seasons {
    pub fn new(current: u16) -> Self {
        Self {
            current,
            next: current.saturating_add(1),
        }
    }
}

/// Summary of a prop's history inside one window. The all-zero default is
/// the answer for an empty window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub median: f64,
    pub total_games: usize,
    pub hits: usize,
    pub hit_rate: f64,
}

/// Compute window stats and the hit rate of `line` in `direction`.
///
/// Only points of the frame's season are considered, ordered by week. Games
/// with a value of zero or less are treated as not played and dropped before
/// anything is counted. Never fails: degenerate input gives `Stats::default()`.
pub fn compute_stats(
    points: &[NormalizedPoint],
    time_frame: TimeFrame,
    seasons: Seasons,
    line: f64,
    direction: Direction,
) -> Stats {
    let values: Vec<f64> = window(points, time_frame, seasons)
        .into_iter()
        .filter(|v| *v > 0.0)
        .collect();

    if values.is_empty() {
        return Stats::default();
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let count = values.len();
    let high = sorted[count - 1];
    let low = sorted[0];
    let mean = values.iter().sum::<f64>() / count as f64;
    let median = sorted[count / 2];
    let hits = values.iter().filter(|v| direction.hits(**v, line)).count();

    Stats {
        high,
        low,
        average: round_tenth(mean),
        median: round_tenth(median),
        total_games: count,
        hits,
        hit_rate: round_tenth(100.0 * hits as f64 / count as f64),
    }
}

/// Season-scoped values in week order, cut to the frame's recency slice.
fn window(points: &[NormalizedPoint], time_frame: TimeFrame, seasons: Seasons) -> Vec<f64> {
    let season = time_frame.season(seasons);
    let mut in_season: Vec<&NormalizedPoint> =
        points.iter().filter(|p| p.season == season).collect();
    in_season.sort_by_key(|p| p.week);

    let skip = time_frame
        .recent_games()
        .map(|n| in_season.len().saturating_sub(n))
        .unwrap_or(0);
    in_season.into_iter().skip(skip).map(|p| p.value).collect()
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASONS: Seasons = Seasons { current: 2024, next: 2025 };

    fn pt(week: u8, season: u16, value: f64) -> NormalizedPoint {
        NormalizedPoint { week, season, value }
    }

    fn season_points(values: &[f64]) -> Vec<NormalizedPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| pt(i as u8 + 1, 2024, *v))
            .collect()
    }

    #[test]
    fn passing_yards_scenario() {
        let points = season_points(&[215.0, 241.0, 353.0]);
        let stats = compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, 249.5, Direction::Over);
        assert_eq!(
            stats,
            Stats {
                high: 353.0,
                low: 215.0,
                average: 269.7,
                median: 241.0,
                total_games: 3,
                hits: 1,
                hit_rate: 33.3,
            }
        );
    }

    #[test]
    fn passing_yards_scenario_from_game_records() {
        use crate::props::{PropType, extract_values};
        use nfl_api::GameRecord;

        let game = |week: u8, season: u16, passing_yards: f64| GameRecord {
            week,
            season,
            passing_yards,
            ..Default::default()
        };
        let records = [
            game(3, 2024, 353.0),
            game(1, 2024, 215.0),
            game(17, 2023, 412.0),
            game(2, 2024, 241.0),
            game(4, 2024, 0.0),
        ];
        let points = extract_values(&records, PropType::PassingYards);
        let stats = compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, 249.5, Direction::Over);
        assert_eq!(
            stats,
            Stats {
                high: 353.0,
                low: 215.0,
                average: 269.7,
                median: 241.0,
                total_games: 3,
                hits: 1,
                hit_rate: 33.3,
            }
        );
    }

    #[test]
    fn next_season_without_games_is_zero() {
        let points = season_points(&[215.0, 241.0, 353.0]);
        let stats = compute_stats(&points, TimeFrame::SeasonNext, SEASONS, 249.5, Direction::Over);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn all_zero_points_are_zero_stats() {
        let points = season_points(&[0.0, 0.0, 0.0, 0.0]);
        for frame in TimeFrame::ALL {
            let stats = compute_stats(&points, frame, SEASONS, 0.5, Direction::Under);
            assert_eq!(stats, Stats::default());
        }
    }

    #[test]
    fn ties_never_hit() {
        let points = season_points(&[50.0, 50.0, 60.0]);
        let over = compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, 50.0, Direction::Over);
        let under = compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, 50.0, Direction::Under);
        assert_eq!(over.hits, 1);
        assert_eq!(under.hits, 0);
        assert_eq!(under.hit_rate, 0.0);
    }

    #[test]
    fn recency_windows_bound_game_count() {
        let values: Vec<f64> = (1..=17).map(|v| v as f64 * 10.0).collect();
        let points = season_points(&values);
        let l5 = compute_stats(&points, TimeFrame::Last5, SEASONS, 0.5, Direction::Over);
        let l10 = compute_stats(&points, TimeFrame::Last10, SEASONS, 0.5, Direction::Over);
        let l20 = compute_stats(&points, TimeFrame::Last20, SEASONS, 0.5, Direction::Over);
        assert_eq!(l5.total_games, 5);
        assert_eq!(l5.low, 130.0);
        assert_eq!(l5.high, 170.0);
        assert_eq!(l10.total_games, 10);
        assert_eq!(l20.total_games, 17);
    }

    #[test]
    fn short_season_is_not_padded() {
        let points = season_points(&[12.0, 30.0]);
        let stats = compute_stats(&points, TimeFrame::Last5, SEASONS, 20.5, Direction::Over);
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.hit_rate, 50.0);
    }

    #[test]
    fn window_counts_zero_games_before_excluding_them() {
        // Weeks 3-7 are the last five; week 5 is a zero and drops out.
        let points = season_points(&[90.0, 90.0, 10.0, 20.0, 0.0, 40.0, 50.0]);
        let stats = compute_stats(&points, TimeFrame::Last5, SEASONS, 0.5, Direction::Over);
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.high, 50.0);
        assert_eq!(stats.low, 10.0);
    }

    #[test]
    fn unordered_input_is_sorted_by_week() {
        let points = vec![
            pt(9, 2024, 90.0),
            pt(1, 2023, 500.0),
            pt(2, 2024, 20.0),
            pt(10, 2024, 100.0),
            pt(1, 2024, 10.0),
            pt(3, 2024, 30.0),
            pt(8, 2024, 80.0),
            pt(4, 2024, 40.0),
        ];
        let stats = compute_stats(&points, TimeFrame::Last5, SEASONS, 0.5, Direction::Over);
        assert_eq!(stats.total_games, 5);
        assert_eq!(stats.low, 30.0);
        assert_eq!(stats.high, 100.0);
    }

    #[test]
    fn median_is_sorted_value_at_half_count_index() {
        let points = season_points(&[40.0, 10.0, 30.0, 20.0]);
        let stats = compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, 0.5, Direction::Over);
        assert_eq!(stats.median, 30.0);
        assert_eq!(stats.average, 25.0);
    }

    #[test]
    fn hit_rate_stays_in_bounds() {
        let points = season_points(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        for line in [-10.0, 0.5, 3.5, 7.0, 100.5] {
            for direction in [Direction::Over, Direction::Under] {
                let stats =
                    compute_stats(&points, TimeFrame::SeasonCurrent, SEASONS, line, direction);
                assert!((0.0..=100.0).contains(&stats.hit_rate));
                assert!(stats.hits <= stats.total_games);
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let points = season_points(&[215.0, 0.0, 353.0, 241.0, 198.0]);
        let a = compute_stats(&points, TimeFrame::Last10, SEASONS, 220.5, Direction::Under);
        let b = compute_stats(&points, TimeFrame::Last10, SEASONS, 220.5, Direction::Under);
        assert_eq!(a, b);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_tenth(269.666), 269.7);
        assert_eq!(round_tenth(33.333), 33.3);
        assert_eq!(round_tenth(66.666), 66.7);
    }

    #[test]
    fn time_frame_cycles_and_labels() {
        assert_eq!(TimeFrame::SeasonNext.next(), TimeFrame::Last5);
        assert_eq!(TimeFrame::Last5.next(), TimeFrame::Last10);
        assert_eq!(TimeFrame::SeasonNext.label(SEASONS), "2025");
        assert_eq!(TimeFrame::Last20.label(SEASONS), "L20");
        assert_eq!(Seasons::new(2024), SEASONS);
    }
}
