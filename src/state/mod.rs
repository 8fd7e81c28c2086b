pub mod app_settings;
pub mod app_state;
pub mod betslip;
pub mod game_log;
pub mod messages;
pub mod network;
