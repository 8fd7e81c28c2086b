use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // Typing a line value swallows every key until Enter or Esc.
    if guard.state.line_input.is_some() {
        match key_event.code {
            KeyCode::Enter => guard.state.commit_line_input(),
            KeyCode::Esc => guard.state.cancel_line_input(),
            KeyCode::Backspace => guard.state.pop_line_input(),
            Char(c) => guard.state.push_line_input(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Roster),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Player),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Betslip),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (_, KeyCode::Esc, _) => guard.back(),

        // Teams
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.state.team_down(),
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.state.team_up(),
        (MenuItem::Teams, KeyCode::Enter, _) => guard.open_highlighted_team(),

        // Roster
        (MenuItem::Roster, Char('j') | KeyCode::Down, _) => guard.state.roster_down(),
        (MenuItem::Roster, Char('k') | KeyCode::Up, _) => guard.state.roster_up(),
        (MenuItem::Roster, KeyCode::Enter, _) => {
            if let Some(key) = guard.toggle_highlighted_player() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadGameLogs { key })
                    .await;
                return;
            }
        }
        (MenuItem::Roster, Char('l') | KeyCode::Right, _) => guard.update_tab(MenuItem::Player),

        // Player card: prop menu and game log
        (MenuItem::Player, Char('j') | KeyCode::Down, _) => guard.state.prop_down(),
        (MenuItem::Player, Char('k') | KeyCode::Up, _) => guard.state.prop_up(),
        (MenuItem::Player, Char('a') | KeyCode::Enter, _) => guard.add_selected_prop(),
        (MenuItem::Player, Char('s'), _) => guard.state.cycle_log_season(),

        // Betslip
        (MenuItem::Betslip, Char('j') | KeyCode::Down, _) => guard.state.betslip.select_next(),
        (MenuItem::Betslip, Char('k') | KeyCode::Up, _) => guard.state.betslip.select_prev(),
        (MenuItem::Betslip, Char('+') | Char('=') | KeyCode::Right, _) => guard.adjust_line(1),
        (MenuItem::Betslip, Char('-') | KeyCode::Left, _) => guard.adjust_line(-1),
        (MenuItem::Betslip, Char('o'), _) => guard.toggle_direction(),
        (MenuItem::Betslip, Char('t'), _) => guard.cycle_time_frame(),
        (MenuItem::Betslip, Char('T'), _) => guard.reset_time_frame(),
        (MenuItem::Betslip, Char('e') | KeyCode::Enter, _) => guard.state.start_line_input(),
        (MenuItem::Betslip, Char('x') | KeyCode::Delete, _) => guard.remove_selected_line(),
        (MenuItem::Betslip, Char('X'), _) => guard.clear_betslip(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
