use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_api::GameRecord;

/// Identifies a game-log fetch so late responses can be matched against the
/// current selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub player_id: String,
    pub season: Option<u16>,
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadGameLogs { key: RequestKey },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    GameLogsLoaded { key: RequestKey, records: Vec<GameRecord> },
    GameLogsFailed { key: RequestKey, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
