use crate::state::app_state::ChartData;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nhl_api::{PlayerGameToi, RosterPlayer, ScheduleGame};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Roster and schedule for one team; the worker fetches both
    /// concurrently and reports each outcome separately.
    LoadTeamData { team: String, season: String, limit: usize },
    LoadPlayerToi { game_id: String, player_id: i64 },
    LoadChart { team: String, player_id: i64, season: String, game_type: i32, limit: usize },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RosterLoaded { team: String, players: Vec<RosterPlayer> },
    ScheduleLoaded { team: String, games: Vec<ScheduleGame> },
    PlayerToiLoaded { toi: PlayerGameToi },
    ChartLoaded { chart: ChartData },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
