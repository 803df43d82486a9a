use crate::nhle::{
    BoxscoreResponse, GameLogResponse, PlayerLandingResponse, RosterEntry, RosterResponse,
    ScheduleEntry, ScheduleResponse,
};
use crate::teams::{self, TeamEntry};
use crate::{boxscore, GameLog, GameLogEntry, PlayerGameToi, RosterPlayer, ScheduleGame};
use chrono::{Datelike, Local, NaiveDate};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const NHL_API_WEB: &str = "https://api-web.nhle.com/v1";

/// Regular season and playoffs, plus preseason, are chartable; gameType 4
/// (all-star and similar exhibitions) is not.
const VALID_GAME_TYPES: [i32; 3] = [1, 2, 3];
const COMPLETED_STATES: [&str; 2] = ["FINAL", "OFF"];

/// NHL stats client backed by the public api-web.nhle.com endpoints.
#[derive(Debug, Clone)]
pub struct NhlApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NhlApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("toitui/0.1 (terminal ice time tracker)")
                .build()
                .unwrap_or_default(),
            base_url: NHL_API_WEB.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Upstream(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Schema(String),
    PlayerNotFound { player_id: i64, game_id: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Upstream(e, url) => write!(f, "Upstream error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Schema(msg) => write!(f, "Schema error: {msg}"),
            ApiError::PlayerNotFound { player_id, game_id } => {
                write!(f, "player {player_id} not found in game {game_id}")
            }
        }
    }
}

impl NhlApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host. Used by the tests to run
    /// against a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// The static team table. Served locally; the upstream has no cheap
    /// equivalent endpoint.
    pub fn teams(&self) -> &'static [TeamEntry] {
        teams::TEAMS
    }

    /// Fetch a team's roster for a season and flatten forwards, defensemen
    /// and goalies into one list.
    pub async fn fetch_roster(&self, team: &str, season: &str) -> ApiResult<Vec<RosterPlayer>> {
        let url = format!("{}/roster/{team}/{season}", self.base_url);
        let raw: RosterResponse = self.get(&url).await?;
        Ok(raw
            .forwards
            .iter()
            .chain(&raw.defensemen)
            .chain(&raw.goalies)
            .filter_map(map_roster_entry)
            .collect())
    }

    /// Fetch a team's season schedule, keeping only completed games of a
    /// chartable game type, newest first, optionally truncated to `limit`.
    pub async fn fetch_schedule(
        &self,
        team: &str,
        season: &str,
        limit: Option<usize>,
    ) -> ApiResult<Vec<ScheduleGame>> {
        let url = format!("{}/club-schedule-season/{team}/{season}", self.base_url);
        let raw: ScheduleResponse = self.get(&url).await?;
        let games = raw
            .games
            .unwrap_or_default()
            .iter()
            .filter_map(map_schedule_entry)
            .collect();
        Ok(completed_games(games, limit))
    }

    /// Fetch a game's boxscore and reconcile it into the one normalized
    /// shape, whichever of the two known payload variants arrived.
    pub async fn fetch_boxscore(&self, game_id: &str) -> ApiResult<crate::Boxscore> {
        let url = format!("{}/gamecenter/{game_id}/boxscore", self.base_url);
        match self.get::<BoxscoreResponse>(&url).await {
            Ok(raw) => boxscore::normalize(game_id, &raw),
            Err(ApiError::NotFound(_)) => Err(ApiError::NotFound(format!(
                "game {game_id} not found or not available yet"
            ))),
            Err(e) => Err(e),
        }
    }

    /// A single player's ice time for one game. Fails with a player-not-found
    /// error — distinguishable from upstream failures — when the id is on
    /// neither side of the boxscore.
    pub async fn fetch_player_toi(
        &self,
        game_id: &str,
        player_id: i64,
    ) -> ApiResult<PlayerGameToi> {
        let boxscore = self.fetch_boxscore(game_id).await?;
        let line = boxscore.find_player(player_id).ok_or_else(|| ApiError::PlayerNotFound {
            player_id,
            game_id: game_id.to_owned(),
        })?;
        Ok(PlayerGameToi {
            player_id: line.player_id,
            name: line.name.clone(),
            game_id: game_id.to_owned(),
            time_on_ice: line.time_on_ice.clone(),
            even_time_on_ice: line.even_time_on_ice.clone(),
            power_play_time_on_ice: line.power_play_time_on_ice.clone(),
            shorthanded_time_on_ice: line.shorthanded_time_on_ice.clone(),
            shifts: line.shifts,
        })
    }

    /// A player's recent game log with ice-time fields. The upstream varies
    /// key casing and naming between deployments, so entries are read through
    /// a case-insensitive synonym lookup per metric.
    pub async fn fetch_game_log(
        &self,
        player_id: i64,
        season: &str,
        game_type: i32,
        limit: usize,
    ) -> ApiResult<GameLog> {
        let landing_url = format!("{}/player/{player_id}/landing", self.base_url);
        let landing: PlayerLandingResponse = self.get(&landing_url).await?;

        let log_url = format!(
            "{}/player/{player_id}/game-log/{season}/{game_type}",
            self.base_url
        );
        let raw: GameLogResponse = self.get(&log_url).await?;

        let games: Vec<GameLogEntry> = raw
            .game_log
            .iter()
            .filter_map(map_game_log_entry)
            .take(limit)
            .collect();

        let player_name = match (landing.first_name, landing.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first.default, last.default),
            _ => format!("Player #{player_id}"),
        };

        Ok(GameLog { player_id, player_name, game_type, games })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                    Err(ApiError::NotFound(url.to_owned()))
                } else {
                    Err(ApiError::Upstream(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: NHL wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_roster_entry(entry: &RosterEntry) -> Option<RosterPlayer> {
    let id = entry.id?;
    Some(RosterPlayer {
        id,
        first_name: entry.first_name.as_ref().map(|n| n.default.clone()).unwrap_or_default(),
        last_name: entry.last_name.as_ref().map(|n| n.default.clone()).unwrap_or_default(),
        sweater_number: entry.sweater_number,
        position: entry.position_code.clone().unwrap_or_default(),
    })
}

fn map_schedule_entry(entry: &ScheduleEntry) -> Option<ScheduleGame> {
    let id = entry.id?;
    let home = entry.home_team.as_ref();
    let away = entry.away_team.as_ref();
    Some(ScheduleGame {
        id,
        game_date: entry.game_date.clone(),
        game_type: entry.game_type.unwrap_or(0),
        game_state: entry.game_state.clone(),
        home_abbrev: home.and_then(|t| t.abbrev.clone()).unwrap_or_default(),
        away_abbrev: away.and_then(|t| t.abbrev.clone()).unwrap_or_default(),
        home_score: home.and_then(|t| t.score),
        away_score: away.and_then(|t| t.score),
    })
}

/// Keep chartable game types, then completed games only, newest first,
/// truncated to `limit` when given.
fn completed_games(games: Vec<ScheduleGame>, limit: Option<usize>) -> Vec<ScheduleGame> {
    let mut games: Vec<ScheduleGame> = games
        .into_iter()
        .filter(|g| VALID_GAME_TYPES.contains(&g.game_type))
        .filter(|g| COMPLETED_STATES.contains(&g.game_state.as_str()))
        .collect();
    // Upstream dates are ISO "YYYY-MM-DD", so byte order is date order.
    games.sort_by(|a, b| b.game_date.cmp(&a.game_date));
    if let Some(limit) = limit {
        games.truncate(limit);
    }
    games
}

type RawGameLogEntry = serde_json::Map<String, serde_json::Value>;

/// First value whose key case-insensitively matches one of `names`, in
/// synonym priority order.
fn field<'a>(entry: &'a RawGameLogEntry, names: &[&str]) -> Option<&'a serde_json::Value> {
    names.iter().find_map(|name| {
        entry
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn string_field(entry: &RawGameLogEntry, names: &[&str], default: &str) -> String {
    field(entry, names)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| default.to_owned())
}

/// Entries without a game date are dropped; every metric falls back across
/// the naming conventions the upstream has been seen to use.
fn map_game_log_entry(entry: &RawGameLogEntry) -> Option<GameLogEntry> {
    let game_date = field(entry, &["gameDate"]).and_then(|v| v.as_str())?.to_owned();

    let game_id = match field(entry, &["gameId"]) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let is_home = field(entry, &["homeRoad", "homeRoadCode"])
        .and_then(|v| v.as_str())
        .map(|v| v.eq_ignore_ascii_case("H"))
        .unwrap_or(false);
    let opponent_abbrev = string_field(entry, &["opponentAbbrev"], "Unknown");
    let opponent = format!("{} {opponent_abbrev}", if is_home { "vs" } else { "@" });

    Some(GameLogEntry {
        game_id,
        game_date,
        opponent,
        time_on_ice: string_field(entry, &["timeOnIce", "toi"], "0:00"),
        even_time_on_ice: string_field(entry, &["evenTimeOnIce", "evenStrengthTHoi"], "0:00"),
        power_play_time_on_ice: string_field(entry, &["powerPlayTimeOnIce", "powerPlayToi"], "0:00"),
        shorthanded_time_on_ice: string_field(
            entry,
            &["shorthandedTimeOnIce", "shorthandedToi"],
            "0:00",
        ),
        shifts: field(entry, &["shifts"]).and_then(|v| v.as_u64()).unwrap_or(0) as u32,
    })
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonOption {
    pub value: String, // "20232024"
    pub label: String, // "2023-24 (Current)"
}

/// The current season in "YYYYZZZZ" form. Hockey runs September through
/// June, so September or later belongs to the season ending next year.
pub fn current_season() -> String {
    season_for(Local::now().date_naive())
}

fn season_for(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= 9 {
        format!("{year}{}", year + 1)
    } else {
        format!("{}{year}", year - 1)
    }
}

/// The current season plus the previous two, with display labels.
pub fn available_seasons() -> Vec<SeasonOption> {
    seasons_from(current_season())
}

fn seasons_from(current: String) -> Vec<SeasonOption> {
    let start_year: i32 = current
        .get(..4)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| Local::now().year());
    (0..3)
        .map(|back| {
            let start = start_year - back;
            let end_short = (start + 1) % 100;
            let label = if back == 0 {
                format!("{start}-{end_short:02} (Current)")
            } else {
                format!("{start}-{end_short:02}")
            };
            SeasonOption { value: format!("{start}{}", start + 1), label }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_rolls_over_in_september() {
        let aug = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        let sep = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(season_for(aug), "20232024");
        assert_eq!(season_for(sep), "20242025");
    }

    #[test]
    fn season_in_spring_belongs_to_previous_year() {
        let apr = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        assert_eq!(season_for(apr), "20232024");
    }

    #[test]
    fn three_seasons_are_offered() {
        let seasons = seasons_from("20232024".to_owned());
        assert_eq!(
            seasons,
            vec![
                SeasonOption { value: "20232024".into(), label: "2023-24 (Current)".into() },
                SeasonOption { value: "20222023".into(), label: "2022-23".into() },
                SeasonOption { value: "20212022".into(), label: "2021-22".into() },
            ]
        );
    }

    fn schedule_game(id: i64, date: &str, game_type: i32, state: &str) -> ScheduleGame {
        ScheduleGame {
            id,
            game_date: date.into(),
            game_type,
            game_state: state.into(),
            home_abbrev: "EDM".into(),
            away_abbrev: "TOR".into(),
            home_score: Some(3),
            away_score: Some(2),
        }
    }

    #[test]
    fn schedule_filter_keeps_completed_chartable_games_newest_first() {
        let games = vec![
            schedule_game(1, "2023-10-11", 1, "FINAL"),
            schedule_game(2, "2023-10-14", 2, "OFF"),
            schedule_game(3, "2023-10-17", 2, "FUT"),
            schedule_game(4, "2023-10-12", 3, "FINAL"),
            schedule_game(5, "2023-10-13", 4, "FINAL"),
        ];
        let kept = completed_games(games, None);
        let ids: Vec<i64> = kept.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn schedule_filter_honors_the_limit() {
        let games = vec![
            schedule_game(1, "2023-10-11", 2, "FINAL"),
            schedule_game(2, "2023-10-14", 2, "FINAL"),
            schedule_game(3, "2023-10-12", 2, "FINAL"),
        ];
        let kept = completed_games(games, Some(2));
        let ids: Vec<i64> = kept.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    fn raw_entry(json: serde_json::Value) -> RawGameLogEntry {
        match json {
            serde_json::Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn game_log_entry_reads_canonical_keys() {
        let entry = raw_entry(serde_json::json!({
            "gameId": 2023020001i64,
            "gameDate": "2023-10-15",
            "homeRoad": "H",
            "opponentAbbrev": "TOR",
            "timeOnIce": "21:33",
            "shifts": 26,
        }));
        let mapped = map_game_log_entry(&entry).unwrap();
        assert_eq!(mapped.game_id, "2023020001");
        assert_eq!(mapped.opponent, "vs TOR");
        assert_eq!(mapped.time_on_ice, "21:33");
        assert_eq!(mapped.shifts, 26);
        // Metrics the payload omitted fall back to "0:00".
        assert_eq!(mapped.even_time_on_ice, "0:00");
    }

    #[test]
    fn game_log_entry_tolerates_alternate_key_conventions() {
        let entry = raw_entry(serde_json::json!({
            "GAMEID": "2023020002",
            "GameDate": "2023-10-17",
            "homeRoadCode": "R",
            "OpponentAbbrev": "BOS",
            "TOI": "18:05",
            "powerPlayToi": "02:40",
        }));
        let mapped = map_game_log_entry(&entry).unwrap();
        assert_eq!(mapped.game_id, "2023020002");
        assert_eq!(mapped.opponent, "@ BOS");
        assert_eq!(mapped.time_on_ice, "18:05");
        assert_eq!(mapped.power_play_time_on_ice, "02:40");
    }

    #[test]
    fn game_log_entry_without_a_date_is_dropped() {
        let entry = raw_entry(serde_json::json!({
            "gameId": 2023020003i64,
            "opponentAbbrev": "NYR",
        }));
        assert!(map_game_log_entry(&entry).is_none());
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;

    async fn mock_server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    #[tokio::test]
    async fn roster_flattens_position_groups() {
        let mut server = mock_server().await;
        let _mock = server
            .mock("GET", "/roster/EDM/20232024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "forwards": [{"id": 1, "firstName": {"default": "Connor"}, "lastName": {"default": "McDavid"}, "sweaterNumber": 97, "positionCode": "C"}],
                    "defensemen": [{"id": 2, "firstName": {"default": "Evan"}, "lastName": {"default": "Bouchard"}, "sweaterNumber": 2, "positionCode": "D"}],
                    "goalies": [{"id": 3, "firstName": {"default": "Stuart"}, "lastName": {"default": "Skinner"}, "sweaterNumber": 74, "positionCode": "G"}]
                }"#,
            )
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let roster = api.fetch_roster("EDM", "20232024").await.unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].full_name(), "Connor McDavid");
        assert_eq!(roster[2].position, "G");
    }

    #[tokio::test]
    async fn missing_game_is_a_not_found_error() {
        let mut server = mock_server().await;
        let _mock = server
            .mock("GET", "/gamecenter/2023029999/boxscore")
            .with_status(404)
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let err = api.fetch_boxscore("2023029999").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "got: {err}");
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn upstream_5xx_is_an_upstream_error() {
        let mut server = mock_server().await;
        let _mock = server
            .mock("GET", "/roster/EDM/20232024")
            .with_status(503)
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let err = api.fetch_roster("EDM", "20232024").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(..)), "got: {err}");
    }

    #[tokio::test]
    async fn player_toi_is_served_from_either_boxscore_variant() {
        let mut server = mock_server().await;
        let _mock = server
            .mock("GET", "/gamecenter/2023020001/boxscore")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "homeTeam": {"abbrev": "EDM", "score": 4},
                    "awayTeam": {"abbrev": "TOR", "score": 2},
                    "playerByGameStats": {
                        "homeTeam": {
                            "forwards": [{"playerId": 8478402, "name": {"default": "Connor McDavid"}, "position": "C", "sweaterNumber": 97, "toi": "22:45", "shifts": 27}],
                            "defense": [],
                            "goalies": []
                        },
                        "awayTeam": {"forwards": [], "defense": [], "goalies": []}
                    }
                }"#,
            )
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let toi = api.fetch_player_toi("2023020001", 8478402).await.unwrap();
        assert_eq!(toi.name, "Connor McDavid");
        assert_eq!(toi.time_on_ice, "22:45");
        assert_eq!(toi.even_time_on_ice, "00:00"); // absent upstream, defaulted

        let err = api.fetch_player_toi("2023020001", 12345).await.unwrap_err();
        assert!(matches!(err, ApiError::PlayerNotFound { player_id: 12345, .. }), "got: {err}");
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn unrecognized_boxscore_shape_is_a_schema_error() {
        let mut server = mock_server().await;
        let _mock = server
            .mock("GET", "/gamecenter/2023020001/boxscore")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"homeTeam": {"abbrev": "EDM"}, "awayTeam": {"abbrev": "TOR"}}"#)
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let err = api.fetch_boxscore("2023020001").await.unwrap_err();
        assert!(matches!(err, ApiError::Schema(_)), "got: {err}");
    }

    #[tokio::test]
    async fn game_log_joins_player_name_and_entries() {
        let mut server = mock_server().await;
        let _landing = server
            .mock("GET", "/player/8478402/landing")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"firstName": {"default": "Connor"}, "lastName": {"default": "McDavid"}}"#)
            .create_async()
            .await;
        let _log = server
            .mock("GET", "/player/8478402/game-log/20232024/2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"gameLog": [
                    {"gameId": 2023020010, "gameDate": "2023-10-18", "homeRoad": "R", "opponentAbbrev": "VAN", "toi": "23:02", "shifts": 28},
                    {"gameId": 2023020001, "gameDate": "2023-10-15", "homeRoad": "H", "opponentAbbrev": "TOR", "timeOnIce": "22:45", "shifts": 27},
                    {"gameId": 2023020000}
                ]}"#,
            )
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let log = api.fetch_game_log(8478402, "20232024", 2, 10).await.unwrap();
        assert_eq!(log.player_name, "Connor McDavid");
        // The dateless entry is dropped.
        assert_eq!(log.games.len(), 2);
        assert_eq!(log.games[0].opponent, "@ VAN");
        assert_eq!(log.games[1].opponent, "vs TOR");
        assert_eq!(log.games[1].time_on_ice, "22:45");
    }

    #[tokio::test]
    async fn game_log_limit_truncates_entries() {
        let mut server = mock_server().await;
        let _landing = server
            .mock("GET", "/player/99/landing")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{}"#)
            .create_async()
            .await;
        let _log = server
            .mock("GET", "/player/99/game-log/20232024/2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"gameLog": [
                    {"gameDate": "2023-10-18", "opponentAbbrev": "VAN"},
                    {"gameDate": "2023-10-15", "opponentAbbrev": "TOR"},
                    {"gameDate": "2023-10-12", "opponentAbbrev": "BOS"}
                ]}"#,
            )
            .create_async()
            .await;

        let api = NhlApi::with_base_url(server.url());
        let log = api.fetch_game_log(99, "20232024", 2, 2).await.unwrap();
        assert_eq!(log.games.len(), 2);
        assert_eq!(log.player_name, "Player #99");
    }
}
