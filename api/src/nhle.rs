/// NHL API raw wire types — serde shapes for deserializing api-web.nhle.com
/// responses. These map to the clean domain types via the mapping functions
/// in client.rs and boxscore.rs.
use serde::Deserialize;
use std::collections::HashMap;

/// Many NHL fields are localized objects: `{"default": "Connor McDavid"}`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Localized {
    #[serde(default)]
    pub default: String,
}

// ---------------------------------------------------------------------------
// Club schedule  (/v1/club-schedule-season/{team}/{season})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    pub games: Option<Vec<ScheduleEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: Option<i64>,
    pub game_type: Option<i32>,
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub game_state: String,
    pub home_team: Option<ScheduleTeam>,
    pub away_team: Option<ScheduleTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleTeam {
    pub abbrev: Option<String>,
    pub name: Option<Localized>,
    pub score: Option<u32>,
}

// ---------------------------------------------------------------------------
// Roster  (/v1/roster/{team}/{season})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    #[serde(default)]
    pub forwards: Vec<RosterEntry>,
    #[serde(default)]
    pub defensemen: Vec<RosterEntry>,
    #[serde(default)]
    pub goalies: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: Option<i64>,
    pub first_name: Option<Localized>,
    pub last_name: Option<Localized>,
    pub sweater_number: Option<u32>,
    pub position_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Boxscore  (/v1/gamecenter/{gameId}/boxscore)
//
// Two shapes have been observed for the per-player stats. Older payloads
// carry id-keyed `players` maps on each team; newer ones carry a
// `playerByGameStats` tree with forwards/defense/goalies arrays per side.
// Both are optional here; boxscore.rs decides which one arrived.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreResponse {
    pub id: Option<i64>,
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub game_state: String,
    #[serde(default)]
    pub home_team: BoxTeam,
    #[serde(default)]
    pub away_team: BoxTeam,
    pub player_by_game_stats: Option<PlayerByGameStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxTeam {
    pub id: Option<i64>,
    pub abbrev: Option<String>,
    pub name: Option<Localized>,
    pub score: Option<u32>,
    /// Legacy shape: map keyed by synthetic ids like "ID8478402".
    pub players: Option<HashMap<String, LegacyPlayer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPlayer {
    pub player_id: Option<i64>,
    pub name: Option<Localized>,
    pub position: Option<String>,
    pub sweater_number: Option<u32>,
    pub time_on_ice: Option<String>,
    pub even_time_on_ice: Option<String>,
    pub power_play_time_on_ice: Option<String>,
    pub shorthanded_time_on_ice: Option<String>,
    pub shifts: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerByGameStats {
    pub home_team: Option<SidePlayers>,
    pub away_team: Option<SidePlayers>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SidePlayers {
    #[serde(default)]
    pub forwards: Vec<GamePlayer>,
    #[serde(default)]
    pub defense: Vec<GamePlayer>,
    #[serde(default)]
    pub goalies: Vec<GamePlayer>,
}

/// One entry under playerByGameStats. Skaters and goalies share the fields
/// this crate cares about; goalie-only stats are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    pub player_id: Option<i64>,
    pub name: Option<Localized>,
    pub position: Option<String>,
    pub sweater_number: Option<u32>,
    pub toi: Option<String>,
    pub even_time_on_ice: Option<String>,
    pub power_play_time_on_ice: Option<String>,
    pub shorthanded_time_on_ice: Option<String>,
    pub shifts: Option<u32>,
}

// ---------------------------------------------------------------------------
// Player landing  (/v1/player/{id}/landing)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLandingResponse {
    pub first_name: Option<Localized>,
    pub last_name: Option<Localized>,
}

// ---------------------------------------------------------------------------
// Game log  (/v1/player/{id}/game-log/{season}/{gameType})
//
// Entries are kept as raw JSON maps: the upstream varies key casing and
// naming per metric ("timeOnIce" vs "toi", "homeRoad" vs "homeRoadCode"),
// so client.rs reads them through a case-insensitive synonym lookup.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameLogResponse {
    #[serde(default)]
    pub game_log: Vec<serde_json::Map<String, serde_json::Value>>,
}
