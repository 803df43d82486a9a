use crate::state::app_state::ChartData;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nhl_api::chart;
use nhl_api::client::NhlApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

/// Trailing window, in games, for the rolling-average overlay.
const ROLLING_WINDOW: usize = 5;

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serial network worker: one request at a time, no retries, no cancellation.
/// Responses apply in arrival order, so a superseded fetch can still land
/// after a newer one — the UI shows whatever arrived last.
pub struct NetworkWorker {
    client: NhlApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: NhlApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let results = match request {
                NetworkRequest::LoadTeamData { team, season, limit } => {
                    self.handle_load_team_data(team, season, limit).await
                }
                NetworkRequest::LoadPlayerToi { game_id, player_id } => {
                    self.handle_load_player_toi(game_id, player_id).await
                }
                NetworkRequest::LoadChart { team, player_id, season, game_type, limit } => {
                    self.handle_load_chart(team, player_id, season, game_type, limit).await
                }
            };

            debug!("network request complete");
            let all_ok = !results
                .iter()
                .any(|r| matches!(r, NetworkResponse::Error { .. }));
            self.stop_loading_animation(all_ok).await;

            for response in results {
                if let Err(e) = self.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                    return;
                }
            }
        }
    }

    /// Roster and schedule are independent; fetch them concurrently and
    /// report each outcome on its own so one failing does not hide the other.
    async fn handle_load_team_data(
        &self,
        team: String,
        season: String,
        limit: usize,
    ) -> Vec<NetworkResponse> {
        debug!("loading roster and schedule for {team} ({season})");
        let (roster, schedule) = tokio::join!(
            self.client.fetch_roster(&team, &season),
            self.client.fetch_schedule(&team, &season, Some(limit)),
        );

        let mut out = Vec::with_capacity(2);
        match roster {
            Ok(players) => out.push(NetworkResponse::RosterLoaded { team: team.clone(), players }),
            Err(e) => out.push(NetworkResponse::Error { message: e.to_string() }),
        }
        match schedule {
            Ok(games) => out.push(NetworkResponse::ScheduleLoaded { team, games }),
            Err(e) => out.push(NetworkResponse::Error { message: e.to_string() }),
        }
        out
    }

    async fn handle_load_player_toi(
        &self,
        game_id: String,
        player_id: i64,
    ) -> Vec<NetworkResponse> {
        debug!("loading ice time for player {player_id} in game {game_id}");
        match self.client.fetch_player_toi(&game_id, player_id).await {
            Ok(toi) => vec![NetworkResponse::PlayerToiLoaded { toi }],
            Err(e) => vec![NetworkResponse::Error { message: e.to_string() }],
        }
    }

    /// The chart needs the display window plus a wider fetch so the rolling
    /// average has history behind the oldest visible game. Both run
    /// concurrently; losing the wider one only costs the overlay.
    async fn handle_load_chart(
        &self,
        team: String,
        player_id: i64,
        season: String,
        game_type: i32,
        limit: usize,
    ) -> Vec<NetworkResponse> {
        debug!("loading game log for player {player_id} ({season}, type {game_type})");
        let (display, extended) = tokio::join!(
            self.client.fetch_game_log(player_id, &season, game_type, limit),
            self.client
                .fetch_game_log(player_id, &season, game_type, limit + ROLLING_WINDOW),
        );

        let mut out = Vec::new();
        let log = match display {
            Ok(log) => log,
            Err(e) => {
                out.push(NetworkResponse::Error { message: e.to_string() });
                return out;
            }
        };

        let records = chart::game_records(&log);
        let rolling = match extended {
            Ok(extended_log) => {
                let minutes: Vec<f64> = chart::game_records(&extended_log)
                    .iter()
                    .map(|r| r.toi_minutes)
                    .collect();
                let mut rolling = chart::rolling_average(&minutes, ROLLING_WINDOW);
                rolling.truncate(records.len());
                Some(rolling)
            }
            Err(e) => {
                out.push(NetworkResponse::Error { message: e.to_string() });
                None
            }
        };

        out.push(NetworkResponse::ChartLoaded {
            chart: ChartData {
                team,
                player_id,
                player_name: log.player_name.clone(),
                game_type,
                records,
                rolling,
            },
        });
        out
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
