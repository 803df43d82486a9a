use crate::app::MenuItem;
use chrono::Local;
use nhl_api::client::{available_seasons, SeasonOption};
use nhl_api::teams::{TeamEntry, TEAMS};
use nhl_api::{chart, PlayerGameRecord, PlayerGameToi, RosterPlayer, ScheduleGame};

pub const GAME_LIMIT_CHOICES: [usize; 4] = [5, 10, 20, 41];

// ---------------------------------------------------------------------------
// Dashboard state: team / player / game selectors + single-game ice time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaneFocus {
    #[default]
    Teams,
    Players,
    Games,
}

impl PaneFocus {
    pub fn next(self) -> Self {
        match self {
            PaneFocus::Teams => PaneFocus::Players,
            PaneFocus::Players => PaneFocus::Games,
            PaneFocus::Games => PaneFocus::Teams,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PaneFocus::Teams => PaneFocus::Games,
            PaneFocus::Players => PaneFocus::Teams,
            PaneFocus::Games => PaneFocus::Players,
        }
    }
}

#[derive(Debug)]
pub struct DashboardState {
    pub teams: &'static [TeamEntry],
    pub selected_team: usize,
    /// Team whose roster/schedule is loaded (or loading). Selector movement
    /// alone does not change it; Enter does.
    pub active_team: Option<String>,
    pub seasons: Vec<SeasonOption>,
    pub season_index: usize,
    pub game_limit: usize,
    pub focus: PaneFocus,
    pub roster: Vec<RosterPlayer>,
    pub selected_player: usize,
    pub games: Vec<ScheduleGame>,
    pub selected_game: usize,
    pub toi: Option<PlayerGameToi>,
    /// User-facing notice when a TOI lookup failed softly ("may not have
    /// played"), as opposed to a hard upstream error.
    pub toi_notice: Option<String>,
    pub last_loaded_at: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            teams: TEAMS,
            selected_team: 0,
            active_team: None,
            seasons: available_seasons(),
            season_index: 0,
            game_limit: 10,
            focus: PaneFocus::Teams,
            roster: Vec::new(),
            selected_player: 0,
            games: Vec::new(),
            selected_game: 0,
            toi: None,
            toi_notice: None,
            last_loaded_at: None,
        }
    }
}

impl DashboardState {
    pub fn selected_team_entry(&self) -> Option<&'static TeamEntry> {
        self.teams.get(self.selected_team)
    }

    pub fn selected_player_entry(&self) -> Option<&RosterPlayer> {
        self.roster.get(self.selected_player)
    }

    pub fn selected_game_entry(&self) -> Option<&ScheduleGame> {
        self.games.get(self.selected_game)
    }

    pub fn season(&self) -> String {
        self.seasons
            .get(self.season_index)
            .map(|s| s.value.clone())
            .unwrap_or_default()
    }

    pub fn cycle_season(&mut self) {
        if !self.seasons.is_empty() {
            self.season_index = (self.season_index + 1) % self.seasons.len();
        }
    }

    pub fn cycle_game_limit(&mut self) {
        let at = GAME_LIMIT_CHOICES.iter().position(|&l| l == self.game_limit);
        let next = match at {
            Some(i) => GAME_LIMIT_CHOICES[(i + 1) % GAME_LIMIT_CHOICES.len()],
            None => GAME_LIMIT_CHOICES[0],
        };
        self.game_limit = next;
    }

    /// Mark a team selection as active and clear everything derived from the
    /// previous one. Mirrors the selector reset on team change in the UI.
    pub fn activate_selected_team(&mut self) -> Option<String> {
        let team = self.selected_team_entry()?.abbrev.to_owned();
        self.active_team = Some(team.clone());
        self.roster.clear();
        self.selected_player = 0;
        self.games.clear();
        self.selected_game = 0;
        self.toi = None;
        self.toi_notice = None;
        Some(team)
    }

    pub fn navigate_down(&mut self) {
        match self.focus {
            PaneFocus::Teams => {
                let max = self.teams.len().saturating_sub(1);
                if self.selected_team < max {
                    self.selected_team += 1;
                }
            }
            PaneFocus::Players => {
                let max = self.roster.len().saturating_sub(1);
                if self.selected_player < max {
                    self.selected_player += 1;
                }
            }
            PaneFocus::Games => {
                let max = self.games.len().saturating_sub(1);
                if self.selected_game < max {
                    self.selected_game += 1;
                }
            }
        }
    }

    pub fn navigate_up(&mut self) {
        match self.focus {
            PaneFocus::Teams => self.selected_team = self.selected_team.saturating_sub(1),
            PaneFocus::Players => self.selected_player = self.selected_player.saturating_sub(1),
            PaneFocus::Games => self.selected_game = self.selected_game.saturating_sub(1),
        }
    }

    pub fn on_roster_loaded(&mut self, players: Vec<RosterPlayer>) {
        self.roster = players;
        self.selected_player = 0;
    }

    pub fn on_schedule_loaded(&mut self, games: Vec<ScheduleGame>) {
        self.games = games;
        self.selected_game = 0;
        self.toi = None;
        self.toi_notice = None;
        self.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn on_toi_loaded(&mut self, toi: PlayerGameToi) {
        self.toi_notice = None;
        self.toi = Some(toi);
    }
}

// ---------------------------------------------------------------------------
// Ice-time chart state
// ---------------------------------------------------------------------------

/// Everything one chart render needs. Built by the network worker from a
/// fresh game-log fetch; replaced wholesale on the next fetch.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub team: String,
    pub player_id: i64,
    pub player_name: String,
    pub game_type: i32,
    pub records: Vec<PlayerGameRecord>,
    /// Trailing average per game, from the wider secondary fetch. None when
    /// that fetch failed; the chart then renders without the overlay.
    pub rolling: Option<Vec<f64>>,
}

#[derive(Debug, Default)]
pub struct ChartState {
    pub chart: Option<ChartData>,
    pub highlighted: usize,
}

impl ChartState {
    pub fn load(&mut self, chart: ChartData) {
        self.highlighted = 0;
        self.chart = Some(chart);
    }

    pub fn highlight_down(&mut self) {
        let max = self
            .chart
            .as_ref()
            .map(|c| c.records.len().saturating_sub(1))
            .unwrap_or(0);
        if self.highlighted < max {
            self.highlighted += 1;
        }
    }

    pub fn highlight_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn highlighted_record(&self) -> Option<&PlayerGameRecord> {
        self.chart.as_ref()?.records.get(self.highlighted)
    }

    pub fn average_minutes(&self) -> f64 {
        self.chart
            .as_ref()
            .map(|c| chart::average_minutes(&c.records))
            .unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub dashboard: DashboardState,
    pub chart: ChartState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_focus_cycles_through_all_panes() {
        let mut focus = PaneFocus::Teams;
        focus = focus.next();
        assert_eq!(focus, PaneFocus::Players);
        focus = focus.next();
        assert_eq!(focus, PaneFocus::Games);
        focus = focus.next();
        assert_eq!(focus, PaneFocus::Teams);
        assert_eq!(PaneFocus::Teams.prev(), PaneFocus::Games);
    }

    #[test]
    fn navigation_clamps_to_list_bounds() {
        let mut dash = DashboardState::default();
        dash.navigate_up();
        assert_eq!(dash.selected_team, 0);
        for _ in 0..500 {
            dash.navigate_down();
        }
        assert_eq!(dash.selected_team, dash.teams.len() - 1);
    }

    #[test]
    fn activating_a_team_clears_derived_state() {
        let mut dash = DashboardState::default();
        dash.roster = vec![RosterPlayer { id: 1, ..Default::default() }];
        dash.selected_player = 1;
        dash.toi = Some(PlayerGameToi::default());

        let team = dash.activate_selected_team().unwrap();
        assert_eq!(team, dash.teams[0].abbrev);
        assert!(dash.roster.is_empty());
        assert_eq!(dash.selected_player, 0);
        assert!(dash.toi.is_none());
    }

    #[test]
    fn game_limit_cycles_through_choices() {
        let mut dash = DashboardState::default();
        assert_eq!(dash.game_limit, 10);
        dash.cycle_game_limit();
        assert_eq!(dash.game_limit, 20);
        dash.cycle_game_limit();
        assert_eq!(dash.game_limit, 41);
        dash.cycle_game_limit();
        assert_eq!(dash.game_limit, 5);
    }
}
