//! Boxscore reconciliation: the upstream serves per-player stats in one of
//! two shapes, this module flattens either into the same `Boxscore` domain
//! type so callers never learn which one arrived.

use std::collections::{HashMap, HashSet};

use crate::client::ApiError;
use crate::nhle::{BoxscoreResponse, GamePlayer, LegacyPlayer, PlayerByGameStats};
use crate::{Boxscore, PlayerLine, TeamBox};

pub const ZERO_TOI: &str = "00:00";

/// The two observed upstream shapes, as an explicit discriminant so the
/// mapping below is exhaustive.
enum PlayerStatsShape<'a> {
    /// Id-keyed `players` maps on each team (older payloads).
    Legacy {
        home: &'a HashMap<String, LegacyPlayer>,
        away: &'a HashMap<String, LegacyPlayer>,
    },
    /// `playerByGameStats` tree with per-position arrays (newer payloads).
    ByGameStats(&'a PlayerByGameStats),
}

fn detect(raw: &BoxscoreResponse) -> Result<PlayerStatsShape<'_>, ApiError> {
    let home_players = raw.home_team.players.as_ref();
    let away_players = raw.away_team.players.as_ref();

    if let Some(stats) = raw.player_by_game_stats.as_ref()
        && (home_players.is_none() || away_players.is_none())
    {
        return Ok(PlayerStatsShape::ByGameStats(stats));
    }

    match (home_players, away_players) {
        (Some(home), Some(away)) => Ok(PlayerStatsShape::Legacy { home, away }),
        _ => Err(ApiError::Schema(
            "boxscore payload has neither playerByGameStats nor per-team players maps".into(),
        )),
    }
}

/// Reconcile a raw boxscore payload into one `PlayerLine` per player per
/// side. Absent time fields default to "00:00" and absent shift counts to 0.
pub fn normalize(game_id: &str, raw: &BoxscoreResponse) -> Result<Boxscore, ApiError> {
    let (home_players, away_players) = match detect(raw)? {
        PlayerStatsShape::Legacy { home, away } => {
            (map_legacy_side(home), map_legacy_side(away))
        }
        PlayerStatsShape::ByGameStats(stats) => (
            map_game_stats_side(stats.home_team.as_ref()),
            map_game_stats_side(stats.away_team.as_ref()),
        ),
    };

    Ok(Boxscore {
        game_id: game_id.to_owned(),
        home: map_team(&raw.home_team, home_players),
        away: map_team(&raw.away_team, away_players),
    })
}

fn map_team(team: &crate::nhle::BoxTeam, players: Vec<PlayerLine>) -> TeamBox {
    TeamBox {
        abbrev: team.abbrev.clone().unwrap_or_default(),
        score: team.score,
        players,
    }
}

fn map_legacy_side(players: &HashMap<String, LegacyPlayer>) -> Vec<PlayerLine> {
    let mut lines: Vec<PlayerLine> = players.values().filter_map(map_legacy_player).collect();
    // The id-keyed map has no stable iteration order; sort so the output is
    // deterministic and comparable across variants.
    lines.sort_by_key(|p| p.player_id);
    lines
}

fn map_legacy_player(player: &LegacyPlayer) -> Option<PlayerLine> {
    let player_id = player.player_id?;
    Some(PlayerLine {
        player_id,
        name: player
            .name
            .as_ref()
            .map(|n| n.default.clone())
            .unwrap_or_else(|| format!("Player #{player_id}")),
        position: player.position.clone().unwrap_or_default(),
        sweater_number: player.sweater_number.unwrap_or(0),
        time_on_ice: toi_or_zero(player.time_on_ice.as_deref()),
        even_time_on_ice: toi_or_zero(player.even_time_on_ice.as_deref()),
        power_play_time_on_ice: toi_or_zero(player.power_play_time_on_ice.as_deref()),
        shorthanded_time_on_ice: toi_or_zero(player.shorthanded_time_on_ice.as_deref()),
        shifts: player.shifts.unwrap_or(0),
    })
}

fn map_game_stats_side(side: Option<&crate::nhle::SidePlayers>) -> Vec<PlayerLine> {
    let Some(side) = side else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut lines: Vec<PlayerLine> = side
        .forwards
        .iter()
        .chain(&side.defense)
        .chain(&side.goalies)
        .filter_map(map_game_player)
        // One record per player: keep the first occurrence of an id.
        .filter(|p| seen.insert(p.player_id))
        .collect();
    lines.sort_by_key(|p| p.player_id);
    lines
}

fn map_game_player(player: &GamePlayer) -> Option<PlayerLine> {
    let player_id = player.player_id?;
    Some(PlayerLine {
        player_id,
        name: player
            .name
            .as_ref()
            .map(|n| n.default.clone())
            .unwrap_or_else(|| format!("Player #{player_id}")),
        position: player.position.clone().unwrap_or_default(),
        sweater_number: player.sweater_number.unwrap_or(0),
        time_on_ice: toi_or_zero(player.toi.as_deref()),
        even_time_on_ice: toi_or_zero(player.even_time_on_ice.as_deref()),
        power_play_time_on_ice: toi_or_zero(player.power_play_time_on_ice.as_deref()),
        shorthanded_time_on_ice: toi_or_zero(player.shorthanded_time_on_ice.as_deref()),
        shifts: player.shifts.unwrap_or(0),
    })
}

fn toi_or_zero(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => ZERO_TOI.to_owned(),
    }
}
