use crate::app::MenuItem;
use crate::props::{PropOption, Seasons, extract_values, props_for_position};
use crate::state::betslip::{Betslip, BetslipAction, NewLine};
use crate::state::game_log::{GameLogTable, season_options};
use crate::state::messages::RequestKey;
use log::{debug, warn};
use nfl_api::reference::ReferenceData;
use nfl_api::{GameRecord, RosterPlayer, Team};

// ---------------------------------------------------------------------------
// Team browser state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamsState {
    /// Index into `ReferenceData::ordered_teams`.
    pub selected: usize,
}

// ---------------------------------------------------------------------------
// Roster state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RosterState {
    pub team: Option<String>,
    /// Index into the position-grouped roster, flattened.
    pub selected: usize,
}

// ---------------------------------------------------------------------------
// Expanded player state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlayerState {
    pub player_id: Option<String>,
    /// Every fetched game, all seasons. Replaced wholesale on selection.
    pub records: Vec<GameRecord>,
    pub pending: Option<RequestKey>,
    pub load_failed: bool,
    /// Season shown in the game-log table.
    pub log_season: u16,
    pub selected_prop: usize,
}

impl PlayerState {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub seasons: Seasons,
    pub reference: ReferenceData,
    pub teams: TeamsState,
    pub roster: RosterState,
    pub player: PlayerState,
    pub betslip: Betslip,
    /// Typed line value while editing the selected betslip line.
    pub line_input: Option<String>,
}

impl AppState {
    pub fn new(reference: ReferenceData, seasons: Seasons) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            seasons,
            reference,
            teams: TeamsState::default(),
            roster: RosterState::default(),
            player: PlayerState {
                log_season: seasons.current,
                ..PlayerState::default()
            },
            betslip: Betslip::new(seasons),
            line_input: None,
        }
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    pub fn team_count(&self) -> usize {
        self.reference.ordered_teams().len()
    }

    pub fn highlighted_team(&self) -> Option<&Team> {
        self.reference.ordered_teams().get(self.teams.selected).copied()
    }

    pub fn team_down(&mut self) {
        if self.teams.selected + 1 < self.team_count() {
            self.teams.selected += 1;
        }
    }

    pub fn team_up(&mut self) {
        self.teams.selected = self.teams.selected.saturating_sub(1);
    }

    /// Open the highlighted team's roster. Any expanded player is collapsed.
    pub fn select_highlighted_team(&mut self) -> bool {
        let Some(abbr) = self.highlighted_team().map(|t| t.abbr.clone()) else {
            return false;
        };
        self.select_team(&abbr);
        true
    }

    pub fn select_team(&mut self, abbr: &str) {
        debug!("selected team {abbr}");
        if self.roster.team.as_deref() != Some(abbr) {
            self.roster.selected = 0;
            self.collapse_player();
        }
        self.roster.team = Some(abbr.to_string());
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.roster
            .team
            .as_deref()
            .and_then(|abbr| self.reference.team(abbr))
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// The selected team's players in display order.
    pub fn roster_players(&self) -> Vec<&RosterPlayer> {
        let Some(abbr) = self.roster.team.as_deref() else {
            return Vec::new();
        };
        self.reference
            .roster_by_position(abbr)
            .into_iter()
            .flat_map(|(_, players)| players)
            .collect()
    }

    pub fn roster_down(&mut self) {
        if self.roster.selected + 1 < self.roster_players().len() {
            self.roster.selected += 1;
        }
    }

    pub fn roster_up(&mut self) {
        self.roster.selected = self.roster.selected.saturating_sub(1);
    }

    pub fn highlighted_player_id(&self) -> Option<String> {
        self.roster_players()
            .get(self.roster.selected)
            .map(|p| p.player_id.clone())
    }

    /// Expand a player and return the fetch to issue for them. Selecting the
    /// player that is already expanded collapses it instead.
    pub fn select_player(&mut self, player_id: &str) -> Option<RequestKey> {
        if self.player.player_id.as_deref() == Some(player_id) {
            debug!("collapsing player {player_id}");
            self.collapse_player();
            return None;
        }

        let key = RequestKey {
            player_id: player_id.to_string(),
            season: None,
        };
        self.player = PlayerState {
            player_id: Some(player_id.to_string()),
            pending: Some(key.clone()),
            log_season: self.seasons.current,
            ..PlayerState::default()
        };
        Some(key)
    }

    pub fn collapse_player(&mut self) {
        self.player = PlayerState {
            log_season: self.seasons.current,
            ..PlayerState::default()
        };
    }

    pub fn selected_player(&self) -> Option<&RosterPlayer> {
        self.player
            .player_id
            .as_deref()
            .and_then(|id| self.reference.player(id))
    }

    // -----------------------------------------------------------------------
    // Game-log responses
    // -----------------------------------------------------------------------

    /// Store fetched records if they answer the outstanding request. Returns
    /// false for stale responses, which are dropped.
    pub fn on_game_logs_loaded(&mut self, key: RequestKey, records: Vec<GameRecord>) -> bool {
        if self.player.pending.as_ref() != Some(&key) {
            debug!("discarding stale game logs for {}", key.player_id);
            return false;
        }
        self.player.pending = None;
        self.player.load_failed = false;
        self.player.records = records;
        self.last_error = None;
        true
    }

    pub fn on_game_logs_failed(&mut self, key: RequestKey, message: String) -> bool {
        if self.player.pending.as_ref() != Some(&key) {
            debug!("discarding stale failure for {}", key.player_id);
            return false;
        }
        warn!("no game logs for {}: {message}", key.player_id);
        self.player.pending = None;
        self.player.load_failed = true;
        self.player.records.clear();
        self.last_error = Some(message);
        true
    }

    pub fn game_log_table(&self) -> GameLogTable {
        GameLogTable::build(&self.player.records, self.player.log_season)
    }

    pub fn cycle_log_season(&mut self) {
        let options = season_options(self.seasons.current);
        let idx = options
            .iter()
            .position(|s| *s == self.player.log_season)
            .unwrap_or(0);
        self.player.log_season = options[(idx + 1) % options.len()];
    }

    // -----------------------------------------------------------------------
    // Prop menu
    // -----------------------------------------------------------------------

    pub fn prop_options(&self) -> &'static [PropOption] {
        self.selected_player()
            .map(|p| props_for_position(&p.position))
            .unwrap_or(&[])
    }

    pub fn prop_down(&mut self) {
        if self.player.selected_prop + 1 < self.prop_options().len() {
            self.player.selected_prop += 1;
        }
    }

    pub fn prop_up(&mut self) {
        self.player.selected_prop = self.player.selected_prop.saturating_sub(1);
    }

    pub fn is_prop_added(&self, option: &PropOption) -> bool {
        self.player
            .player_id
            .as_deref()
            .is_some_and(|id| self.betslip.contains(id, option.label))
    }

    /// Add the highlighted prop of the expanded player to the betslip. Needs
    /// the game logs to have arrived.
    pub fn add_selected_prop(&mut self) -> Option<u64> {
        if self.player.is_loading() {
            debug!("game logs still loading, not adding prop");
            return None;
        }
        let option = *self.prop_options().get(self.player.selected_prop)?;
        let player = self.selected_player()?;
        let prop_type = option.prop_type();

        let new_line = NewLine {
            player_id: player.player_id.clone(),
            player: player.name.clone(),
            team: player.team.clone(),
            position: player.position.clone(),
            prop_label: option.label.to_string(),
            prop_type,
            game_log: extract_values(&self.player.records, prop_type),
        };
        self.betslip.apply(BetslipAction::Add(new_line))
    }

    // -----------------------------------------------------------------------
    // Betslip editing
    // -----------------------------------------------------------------------

    pub fn apply_to_selected_line(&mut self, action: impl FnOnce(u64) -> BetslipAction) {
        if let Some(id) = self.betslip.selected_id() {
            self.betslip.apply(action(id));
        }
    }

    pub fn start_line_input(&mut self) {
        if self.betslip.selected_line().is_some() {
            self.line_input = Some(String::new());
        }
    }

    pub fn push_line_input(&mut self, c: char) {
        if let Some(input) = &mut self.line_input
            && (c.is_ascii_digit() || c == '.' || c == '-')
        {
            input.push(c);
        }
    }

    pub fn pop_line_input(&mut self) {
        if let Some(input) = &mut self.line_input {
            input.pop();
        }
    }

    pub fn commit_line_input(&mut self) {
        if let Some(input) = self.line_input.take() {
            self.apply_to_selected_line(|id| BetslipAction::SetLine { id, input });
        }
    }

    pub fn cancel_line_input(&mut self) {
        self.line_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{PropType, TimeFrame};

    const SEASONS: Seasons = Seasons { current: 2024, next: 2025 };

    fn state() -> AppState {
        let teams = r#"[
            {"team_abbr": "KC", "team_name": "Kansas City Chiefs", "team_conf": "AFC", "team_division": "AFC West"},
            {"team_abbr": "BUF", "team_name": "Buffalo Bills", "team_conf": "AFC", "team_division": "AFC East"}
        ]"#;
        let rosters = r#"[
            {"player_id": "qb1", "player_name": "Patrick Mahomes", "first_name": "Patrick", "last_name": "Mahomes", "team": "KC", "position": "QB"},
            {"player_id": "te1", "player_name": "Travis Kelce", "first_name": "Travis", "last_name": "Kelce", "team": "KC", "position": "TE"},
            {"player_id": "k1", "player_name": "Harrison Butker", "first_name": "Harrison", "last_name": "Butker", "team": "KC", "position": "K"},
            {"player_id": "qb2", "player_name": "Josh Allen", "first_name": "Josh", "last_name": "Allen", "team": "BUF", "position": "QB"}
        ]"#;
        let reference = ReferenceData::from_json(teams, rosters).unwrap();
        AppState::new(reference, SEASONS)
    }

    fn records() -> Vec<GameRecord> {
        [215.0, 241.0, 353.0]
            .iter()
            .enumerate()
            .map(|(i, yds)| GameRecord {
                week: i as u8 + 1,
                season: 2024,
                passing_yards: *yds,
                ..Default::default()
            })
            .collect()
    }

    fn key(player_id: &str) -> RequestKey {
        RequestKey {
            player_id: player_id.to_string(),
            season: None,
        }
    }

    #[test]
    fn teams_follow_division_order() {
        let mut state = state();
        assert_eq!(state.highlighted_team().map(|t| t.abbr.as_str()), Some("BUF"));
        state.team_down();
        state.team_down();
        assert_eq!(state.highlighted_team().map(|t| t.abbr.as_str()), Some("KC"));
        assert!(state.select_highlighted_team());
        assert_eq!(state.roster.team.as_deref(), Some("KC"));
    }

    #[test]
    fn roster_is_position_ordered() {
        let mut state = state();
        state.select_team("KC");
        let ids: Vec<&str> = state
            .roster_players()
            .iter()
            .map(|p| p.player_id.as_str())
            .collect();
        assert_eq!(ids, vec!["qb1", "te1", "k1"]);
        state.roster_down();
        assert_eq!(state.highlighted_player_id().as_deref(), Some("te1"));
    }

    #[test]
    fn selecting_player_twice_collapses() {
        let mut state = state();
        state.select_team("KC");
        assert_eq!(state.select_player("qb1"), Some(key("qb1")));
        assert!(state.player.is_loading());
        assert_eq!(state.select_player("qb1"), None);
        assert!(state.player.player_id.is_none());
        assert!(!state.player.is_loading());
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("qb1");
        state.select_player("te1");

        assert!(!state.on_game_logs_loaded(key("qb1"), records()));
        assert!(state.player.records.is_empty());
        assert!(state.player.is_loading());

        assert!(state.on_game_logs_loaded(key("te1"), records()));
        assert_eq!(state.player.records.len(), 3);
        assert!(!state.player.is_loading());
    }

    #[test]
    fn failed_fetch_shows_no_data() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("qb1");
        assert!(state.on_game_logs_failed(key("qb1"), "boom".into()));
        assert!(state.player.load_failed);
        assert!(state.player.records.is_empty());
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert!(state.game_log_table().is_empty());
    }

    #[test]
    fn changing_team_collapses_player() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("qb1");
        state.select_team("BUF");
        assert!(state.player.player_id.is_none());
    }

    #[test]
    fn add_prop_uses_fetched_records() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("qb1");
        assert_eq!(state.add_selected_prop(), None);

        state.on_game_logs_loaded(key("qb1"), records());
        let option = state.prop_options()[0];
        assert!(!state.is_prop_added(&option));

        let id = state.add_selected_prop().unwrap();
        let line = state.betslip.line(id).unwrap();
        assert_eq!(line.prop_type, PropType::PassingYards);
        assert_eq!(line.player, "Patrick Mahomes");
        assert_eq!(line.time_frame, TimeFrame::SeasonCurrent);
        assert_eq!(line.stats.total_games, 3);
        assert!(state.is_prop_added(&option));
    }

    #[test]
    fn kicker_has_no_props() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("k1");
        state.on_game_logs_loaded(key("k1"), Vec::new());
        assert!(state.prop_options().is_empty());
        assert_eq!(state.add_selected_prop(), None);
    }

    #[test]
    fn typed_line_is_sanitized() {
        let mut state = state();
        state.select_team("KC");
        state.select_player("qb1");
        state.on_game_logs_loaded(key("qb1"), records());
        let id = state.add_selected_prop().unwrap();

        state.start_line_input();
        for c in "249x.2".chars() {
            state.push_line_input(c);
        }
        assert_eq!(state.line_input.as_deref(), Some("249.2"));
        state.commit_line_input();
        assert_eq!(state.betslip.line(id).unwrap().line_value, 249.5);
        assert!(state.line_input.is_none());
    }

    #[test]
    fn log_season_cycles_through_options() {
        let mut state = state();
        assert_eq!(state.player.log_season, 2024);
        state.cycle_log_season();
        assert_eq!(state.player.log_season, 2023);
        state.cycle_log_season();
        state.cycle_log_season();
        assert_eq!(state.player.log_season, 2024);
    }
}
