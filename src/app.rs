use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, ChartData, PaneFocus};
use crate::state::messages::NetworkRequest;
use nhl_api::{PlayerGameToi, RosterPlayer, ScheduleGame};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    IceTime,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let mut app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app.state.dashboard.game_limit = app.settings.game_limit;
        if let Some(season) = app.settings.season.as_deref() {
            if let Some(idx) = app.state.dashboard.seasons.iter().position(|s| s.value == season) {
                app.state.dashboard.season_index = idx;
            }
        }
        if let Some(favorite) = app.settings.favorite_team.as_deref() {
            if let Some(idx) = app
                .state
                .dashboard
                .teams
                .iter()
                .position(|t| t.abbrev.eq_ignore_ascii_case(favorite))
            {
                app.state.dashboard.selected_team = idx;
            }
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_roster_loaded(&mut self, players: Vec<RosterPlayer>) {
        self.state.last_error = None;
        self.state.dashboard.on_roster_loaded(players);
    }

    pub fn on_schedule_loaded(&mut self, games: Vec<ScheduleGame>) {
        self.state.dashboard.on_schedule_loaded(games);
    }

    pub fn on_player_toi_loaded(&mut self, toi: PlayerGameToi) {
        self.state.last_error = None;
        self.state.dashboard.on_toi_loaded(toi);
    }

    pub fn on_chart_loaded(&mut self, chart: ChartData) {
        self.state.last_error = None;
        self.state.chart.load(chart);
    }

    /// Failures arrive as one flat message; only a "not found" substring
    /// marks the soft case where the player simply did not play.
    pub fn on_error(&mut self, message: String) {
        if message.to_lowercase().contains("not found") {
            self.state.dashboard.toi_notice = Some(
                "Player may not have played in this game, or game data isn't available yet."
                    .to_owned(),
            );
        } else {
            self.state.last_error = Some(message);
        }
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
        let _ = self.settings.save();
    }

    // -----------------------------------------------------------------------
    // Dashboard actions — return the network request to send, if any
    // -----------------------------------------------------------------------

    /// Enter on the team pane: activate the selection and request its roster
    /// and schedule. Remembers the team as the favorite for the next run.
    pub fn select_team(&mut self) -> Option<NetworkRequest> {
        let dash = &mut self.state.dashboard;
        let team = dash.activate_selected_team()?;
        let season = dash.season();
        let limit = dash.game_limit;

        self.settings.favorite_team = Some(team.clone());
        self.settings.season = Some(season.clone());
        let _ = self.settings.save();

        Some(NetworkRequest::LoadTeamData { team, season, limit })
    }

    /// Enter on the games pane: single-game ice time for the selected
    /// player in the selected game.
    pub fn select_game_toi(&mut self) -> Option<NetworkRequest> {
        let dash = &mut self.state.dashboard;
        let player = dash.selected_player_entry()?.id;
        let game = dash.selected_game_entry()?.id;
        dash.toi = None;
        dash.toi_notice = None;
        Some(NetworkRequest::LoadPlayerToi { game_id: game.to_string(), player_id: player })
    }

    /// Enter on the players pane (or 'c' anywhere on the dashboard): load
    /// the selected player's recent-games chart and switch to it.
    pub fn open_chart(&mut self) -> Option<NetworkRequest> {
        let dash = &self.state.dashboard;
        let team = dash.active_team.clone()?;
        let player = dash.selected_player_entry()?;
        let request = NetworkRequest::LoadChart {
            team,
            player_id: player.id,
            season: dash.season(),
            game_type: 2,
            limit: dash.game_limit,
        };
        self.update_tab(MenuItem::IceTime);
        Some(request)
    }

    /// Reload the chart currently on screen (after a season or limit change,
    /// or just to refresh).
    pub fn reload_chart(&self) -> Option<NetworkRequest> {
        let chart = self.state.chart.chart.as_ref()?;
        Some(NetworkRequest::LoadChart {
            team: chart.team.clone(),
            player_id: chart.player_id,
            season: self.state.dashboard.season(),
            game_type: chart.game_type,
            limit: self.state.dashboard.game_limit,
        })
    }

    /// 's' cycles the season; a refetch for the active team keeps the panes
    /// consistent with the new season.
    pub fn cycle_season(&mut self) -> Option<NetworkRequest> {
        self.state.dashboard.cycle_season();
        self.refetch_active_team()
    }

    /// 'g' cycles how many completed games the schedule keeps.
    pub fn cycle_game_limit(&mut self) -> Option<NetworkRequest> {
        self.state.dashboard.cycle_game_limit();
        self.settings.game_limit = self.state.dashboard.game_limit;
        let _ = self.settings.save();
        self.refetch_active_team()
    }

    fn refetch_active_team(&mut self) -> Option<NetworkRequest> {
        let dash = &mut self.state.dashboard;
        let team = dash.active_team.clone()?;
        dash.roster.clear();
        dash.selected_player = 0;
        dash.games.clear();
        dash.selected_game = 0;
        dash.toi = None;
        dash.toi_notice = None;
        Some(NetworkRequest::LoadTeamData {
            team,
            season: dash.season(),
            limit: dash.game_limit,
        })
    }

    /// On startup, auto-load the remembered favorite team so the dashboard
    /// comes up populated.
    pub fn startup_request(&mut self) -> Option<NetworkRequest> {
        self.settings.favorite_team.as_ref()?;
        self.select_team()
    }

    // -----------------------------------------------------------------------
    // Navigation — delegated to the focused pane
    // -----------------------------------------------------------------------

    pub fn focus_next_pane(&mut self) {
        self.state.dashboard.focus = self.state.dashboard.focus.next();
    }

    pub fn focus_prev_pane(&mut self) {
        self.state.dashboard.focus = self.state.dashboard.focus.prev();
    }

    pub fn navigate_down(&mut self) {
        self.state.dashboard.navigate_down();
    }

    pub fn navigate_up(&mut self) {
        self.state.dashboard.navigate_up();
    }

    pub fn focused_pane(&self) -> PaneFocus {
        self.state.dashboard.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        // Not App::new(): tests must not read or write the user's settings.
        App { settings: AppSettings::default(), state: AppState::default() }
    }

    #[test]
    fn not_found_errors_become_a_soft_notice() {
        let mut app = app();
        app.on_error("Not found: game 123 not found or not available yet".into());
        assert!(app.state.dashboard.toi_notice.is_some());
        assert!(app.state.last_error.is_none());
    }

    #[test]
    fn other_errors_are_surfaced_as_is() {
        let mut app = app();
        app.on_error("Upstream error for .../roster: 503".into());
        assert!(app.state.dashboard.toi_notice.is_none());
        assert_eq!(
            app.state.last_error.as_deref(),
            Some("Upstream error for .../roster: 503")
        );
    }

    #[test]
    fn open_chart_requires_an_active_team() {
        let mut app = app();
        assert!(app.open_chart().is_none());
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
    }

    #[test]
    fn select_game_toi_builds_a_request_from_the_selection() {
        let mut app = app();
        app.state.dashboard.roster = vec![RosterPlayer { id: 8478402, ..Default::default() }];
        app.state.dashboard.games = vec![ScheduleGame { id: 2023020001, ..Default::default() }];
        let request = app.select_game_toi().unwrap();
        match request {
            NetworkRequest::LoadPlayerToi { game_id, player_id } => {
                assert_eq!(game_id, "2023020001");
                assert_eq!(player_id, 8478402);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }
}
