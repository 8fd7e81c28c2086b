use crate::props::calculator::round_tenth;
use crate::props::{
    Direction, LineRange, NormalizedPoint, PropType, Seasons, Stats, TimeFrame, TrackMarkers,
    compute_stats,
};
use log::debug;

/// One prop on the slip, with its hit-rate snapshot for the current
/// parameters. The snapshot is recomputed whenever a parameter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct BetLine {
    pub id: u64,
    pub player_id: String,
    pub player: String,
    pub team: String,
    pub position: String,
    pub prop_label: String,
    pub prop_type: PropType,
    pub line_value: f64,
    pub direction: Direction,
    pub time_frame: TimeFrame,
    pub stats: Stats,
    pub game_log: Vec<NormalizedPoint>,
}

impl BetLine {
    pub fn range(&self) -> LineRange {
        LineRange::for_prop(self.prop_type)
    }

    pub fn markers(&self) -> TrackMarkers {
        self.range().markers(&self.stats, self.line_value)
    }

    /// Hit rate relative to a coin flip, scaled to -100..=100.
    pub fn edge(&self) -> f64 {
        round_tenth((self.stats.hit_rate - 50.0) * 2.0)
    }

    fn recompute(&mut self, seasons: Seasons) {
        self.stats = compute_stats(
            &self.game_log,
            self.time_frame,
            seasons,
            self.line_value,
            self.direction,
        );
    }
}

/// What the user picked when adding a prop. Line, direction and window start
/// at their defaults.
#[derive(Debug, Clone)]
pub struct NewLine {
    pub player_id: String,
    pub player: String,
    pub team: String,
    pub position: String,
    pub prop_label: String,
    pub prop_type: PropType,
    pub game_log: Vec<NormalizedPoint>,
}

#[derive(Debug, Clone)]
pub enum BetslipAction {
    Add(NewLine),
    Remove { id: u64 },
    ClearAll,
    AdjustLine { id: u64, steps: i32 },
    SetLine { id: u64, input: String },
    ToggleDirection { id: u64 },
    SetTimeFrame { id: u64, time_frame: TimeFrame },
    CycleTimeFrame { id: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BetslipSummary {
    pub lines: usize,
    /// Mean of the lines' hit rates, 0 for an empty slip.
    pub hit_rate: f64,
}

#[derive(Debug, Clone)]
pub struct Betslip {
    lines: Vec<BetLine>,
    next_id: u64,
    seasons: Seasons,
    pub selected: usize,
}

impl Betslip {
    pub fn new(seasons: Seasons) -> Self {
        Self {
            lines: Vec::new(),
            next_id: 1,
            seasons,
            selected: 0,
        }
    }

    pub fn lines(&self) -> &[BetLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn seasons(&self) -> Seasons {
        self.seasons
    }

    pub fn line(&self, id: u64) -> Option<&BetLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Apply one transition. Returns the id of the line it touched, or `None`
    /// when the action referred to a line that is not on the slip.
    pub fn apply(&mut self, action: BetslipAction) -> Option<u64> {
        let seasons = self.seasons;
        match action {
            BetslipAction::Add(new_line) => Some(self.add(new_line)),
            BetslipAction::Remove { id } => {
                let idx = self.lines.iter().position(|l| l.id == id)?;
                self.lines.remove(idx);
                self.clamp_selection();
                Some(id)
            }
            BetslipAction::ClearAll => {
                debug!("clearing {} lines from betslip", self.lines.len());
                self.lines.clear();
                self.selected = 0;
                None
            }
            BetslipAction::AdjustLine { id, steps } => self.update(id, |line| {
                line.line_value = line.range().adjust(line.line_value, steps);
                line.recompute(seasons);
            }),
            BetslipAction::SetLine { id, input } => self.update(id, |line| {
                line.line_value = line.range().sanitize(&input);
                line.recompute(seasons);
            }),
            BetslipAction::ToggleDirection { id } => self.update(id, |line| {
                line.direction = line.direction.toggle();
                line.recompute(seasons);
            }),
            BetslipAction::SetTimeFrame { id, time_frame } => self.update(id, |line| {
                line.time_frame = time_frame;
                line.recompute(seasons);
            }),
            BetslipAction::CycleTimeFrame { id } => self.update(id, |line| {
                line.time_frame = line.time_frame.next();
                line.recompute(seasons);
            }),
        }
    }

    /// Whether the slip already holds this player's prop. Duplicates are still
    /// allowed; this only drives the "added" marker.
    pub fn contains(&self, player_id: &str, prop_label: &str) -> bool {
        self.lines
            .iter()
            .any(|l| l.player_id == player_id && l.prop_label == prop_label)
    }

    pub fn summary(&self) -> BetslipSummary {
        if self.lines.is_empty() {
            return BetslipSummary::default();
        }
        let total: f64 = self.lines.iter().map(|l| l.stats.hit_rate).sum();
        BetslipSummary {
            lines: self.lines.len(),
            hit_rate: round_tenth(total / self.lines.len() as f64),
        }
    }

    pub fn selected_line(&self) -> Option<&BetLine> {
        self.lines.get(self.selected)
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_line().map(|l| l.id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.lines.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn add(&mut self, new_line: NewLine) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let range = LineRange::for_prop(new_line.prop_type);
        let mut line = BetLine {
            id,
            player_id: new_line.player_id,
            player: new_line.player,
            team: new_line.team,
            position: new_line.position,
            prop_label: new_line.prop_label,
            prop_type: new_line.prop_type,
            line_value: range.default_line(&new_line.game_log),
            direction: Direction::default(),
            time_frame: TimeFrame::default(),
            stats: Stats::default(),
            game_log: new_line.game_log,
        };
        line.recompute(self.seasons);
        debug!(
            "added {} {} {} to betslip ({} games)",
            line.player, line.prop_label, line.line_value, line.stats.total_games
        );
        self.lines.push(line);
        self.selected = self.lines.len() - 1;
        id
    }

    fn update(&mut self, id: u64, f: impl FnOnce(&mut BetLine)) -> Option<u64> {
        let line = self.lines.iter_mut().find(|l| l.id == id)?;
        f(line);
        Some(id)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.lines.len().saturating_sub(1));
    }
}
