use crate::props::TimeFrame;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::betslip::BetslipAction;
use crate::state::messages::RequestKey;
use nfl_api::GameRecord;
use nfl_api::reference::ReferenceData;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Teams,
    Roster,
    Player,
    Betslip,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, reference: ReferenceData) -> Self {
        let app = Self {
            state: AppState::new(reference, settings.seasons),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_game_logs_loaded(&mut self, key: RequestKey, records: Vec<GameRecord>) -> bool {
        self.state.on_game_logs_loaded(key, records)
    }

    pub fn on_game_logs_failed(&mut self, key: RequestKey, message: String) -> bool {
        self.state.on_game_logs_failed(key, message)
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if self.state.active_tab != MenuItem::Betslip {
            self.state.cancel_line_input();
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Teams and roster
    // -----------------------------------------------------------------------

    pub fn open_highlighted_team(&mut self) {
        if self.state.select_highlighted_team() {
            self.update_tab(MenuItem::Roster);
        }
    }

    /// Expand or collapse the highlighted roster player. Returns the
    /// game-log request to send when a new player was expanded.
    pub fn toggle_highlighted_player(&mut self) -> Option<RequestKey> {
        let player_id = self.state.highlighted_player_id()?;
        self.state.select_player(&player_id)
    }

    pub fn back(&mut self) {
        match self.state.active_tab {
            MenuItem::Roster => self.update_tab(MenuItem::Teams),
            MenuItem::Player => self.update_tab(MenuItem::Roster),
            MenuItem::Help => self.exit_help(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Props and betslip
    // -----------------------------------------------------------------------

    pub fn add_selected_prop(&mut self) {
        if self.state.add_selected_prop().is_some() {
            self.state.last_error = None;
        }
    }

    pub fn adjust_line(&mut self, steps: i32) {
        self.state
            .apply_to_selected_line(|id| BetslipAction::AdjustLine { id, steps });
    }

    pub fn toggle_direction(&mut self) {
        self.state
            .apply_to_selected_line(|id| BetslipAction::ToggleDirection { id });
    }

    pub fn cycle_time_frame(&mut self) {
        self.state
            .apply_to_selected_line(|id| BetslipAction::CycleTimeFrame { id });
    }

    /// Put the selected line back on the current-season window.
    pub fn reset_time_frame(&mut self) {
        self.state.apply_to_selected_line(|id| BetslipAction::SetTimeFrame {
            id,
            time_frame: TimeFrame::SeasonCurrent,
        });
    }

    pub fn remove_selected_line(&mut self) {
        self.state.apply_to_selected_line(|id| BetslipAction::Remove { id });
    }

    pub fn clear_betslip(&mut self) {
        self.state.betslip.apply(BetslipAction::ClearAll);
    }
}
