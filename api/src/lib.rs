pub mod boxscore;
pub mod chart;
pub mod client;
pub mod colors;
pub mod nhle;
pub mod teams;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the NHL wire format
// ---------------------------------------------------------------------------

/// One skater or goalie on a team roster.
#[derive(Debug, Clone, Default)]
pub struct RosterPlayer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub sweater_number: Option<u32>,
    pub position: String,
}

impl RosterPlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One completed game from a club schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGame {
    pub id: i64,
    pub game_date: String, // "YYYY-MM-DD" as reported upstream
    pub game_type: i32,    // 1 = preseason, 2 = regular season, 3 = playoffs
    pub game_state: String,
    pub home_abbrev: String,
    pub away_abbrev: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl ScheduleGame {
    /// "AWY @ HOM" label for selector lists.
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_abbrev, self.home_abbrev)
    }

    /// The opponent of `team` as a display string: "vs ABB" at home,
    /// "@ ABB" on the road.
    pub fn opponent_of(&self, team: &str) -> String {
        if self.home_abbrev.eq_ignore_ascii_case(team) {
            format!("vs {}", self.away_abbrev)
        } else {
            format!("@ {}", self.home_abbrev)
        }
    }
}

/// Per-player ice-time line from a boxscore, identical for both upstream
/// payload shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerLine {
    pub player_id: i64,
    pub name: String,
    pub position: String,
    pub sweater_number: u32,
    pub time_on_ice: String, // "MM:SS"
    pub even_time_on_ice: String,
    pub power_play_time_on_ice: String,
    pub shorthanded_time_on_ice: String,
    pub shifts: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TeamBox {
    pub abbrev: String,
    pub score: Option<u32>,
    pub players: Vec<PlayerLine>,
}

/// A reconciled boxscore: one line per player per side, keyed by player id.
#[derive(Debug, Clone, Default)]
pub struct Boxscore {
    pub game_id: String,
    pub home: TeamBox,
    pub away: TeamBox,
}

impl Boxscore {
    /// Look up a player by id. The home side is searched first, so when
    /// malformed upstream data lists the same id on both sides the home
    /// record wins.
    pub fn find_player(&self, player_id: i64) -> Option<&PlayerLine> {
        self.home
            .players
            .iter()
            .find(|p| p.player_id == player_id)
            .or_else(|| self.away.players.iter().find(|p| p.player_id == player_id))
    }
}

/// A single player's ice time for one game, as served to the UI.
#[derive(Debug, Clone, Default)]
pub struct PlayerGameToi {
    pub player_id: i64,
    pub name: String,
    pub game_id: String,
    pub time_on_ice: String,
    pub even_time_on_ice: String,
    pub power_play_time_on_ice: String,
    pub shorthanded_time_on_ice: String,
    pub shifts: u32,
}

/// One game out of a player's game log.
#[derive(Debug, Clone, Default)]
pub struct GameLogEntry {
    pub game_id: String,
    pub game_date: String,
    pub opponent: String, // "vs TOR" / "@ TOR"
    pub time_on_ice: String,
    pub even_time_on_ice: String,
    pub power_play_time_on_ice: String,
    pub shorthanded_time_on_ice: String,
    pub shifts: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GameLog {
    pub player_id: i64,
    pub player_name: String,
    pub game_type: i32,
    pub games: Vec<GameLogEntry>,
}

/// Chart-ready record derived from a game-log entry: opponent resolved to a
/// team abbreviation, date corrected and formatted, TOI as fractional
/// minutes. Recomputed per render, never stored.
#[derive(Debug, Clone, Default)]
pub struct PlayerGameRecord {
    pub game_id: String,
    pub game_date: String,
    pub date_label: String,
    pub opponent: String,
    pub opponent_abbrev: &'static str,
    pub toi_minutes: f64,
    pub time_on_ice: String,
    pub even_time_on_ice: String,
    pub power_play_time_on_ice: String,
    pub shorthanded_time_on_ice: String,
    pub shifts: u32,
}
