//! Presentation shaping: turns game-log entries into chart-ready records.
//! Duration strings become fractional minutes, opponents become team
//! abbreviations, and game dates get the upstream one-day offset corrected.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use crate::teams;
use crate::{GameLog, PlayerGameRecord};

/// Marker returned for unparsable dates; rendered as-is, never an error.
pub const INVALID_DATE: &str = "Invalid Date";

/// "MM:SS" → fractional minutes. Empty or unparsable input yields 0.
///
/// Seconds are not range-checked: upstream occasionally reports raw values
/// like "10:75", and those pass through as 11.25 rather than failing the
/// whole batch.
pub fn toi_minutes(mmss: &str) -> f64 {
    if mmss.is_empty() {
        return 0.0;
    }
    let mut parts = mmss.splitn(2, ':');
    let minutes = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    let seconds = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    match (minutes, seconds) {
        (Some(m), Some(s)) => m as f64 + s as f64 / 60.0,
        _ => 0.0,
    }
}

/// Format an upstream game date for display, e.g. "Oct 16".
///
/// The upstream reports dates one calendar day behind the local expectation,
/// so exactly one day is added before formatting — for plain dates and full
/// datetimes alike. Invalid input produces the literal "Invalid Date".
pub fn display_date(raw: &str) -> String {
    let Some(date) = parse_upstream_date(raw) else {
        return INVALID_DATE.to_owned();
    };
    match date.checked_add_days(Days::new(1)) {
        Some(corrected) => corrected.format("%b %-d").to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

fn parse_upstream_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Derive one chart-ready record per game-log entry. Recomputed on every
/// render; the input order (newest game first) is preserved.
pub fn game_records(log: &GameLog) -> Vec<PlayerGameRecord> {
    log.games
        .iter()
        .map(|g| PlayerGameRecord {
            game_id: g.game_id.clone(),
            game_date: g.game_date.clone(),
            date_label: display_date(&g.game_date),
            opponent: g.opponent.clone(),
            opponent_abbrev: teams::resolve_team(&g.opponent),
            toi_minutes: toi_minutes(&g.time_on_ice),
            time_on_ice: g.time_on_ice.clone(),
            even_time_on_ice: g.even_time_on_ice.clone(),
            power_play_time_on_ice: g.power_play_time_on_ice.clone(),
            shorthanded_time_on_ice: g.shorthanded_time_on_ice.clone(),
            shifts: g.shifts,
        })
        .collect()
}

pub fn average_minutes(records: &[PlayerGameRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.toi_minutes).sum::<f64>() / records.len() as f64
}

/// Trailing mean over `window` games. `minutes` is newest-first, so the
/// window for a game covers that game and the ones played before it.
pub fn rolling_average(minutes: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..minutes.len())
        .map(|i| {
            let slice = &minutes[i..(i + window).min(minutes.len())];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameLogEntry;

    #[test]
    fn toi_minutes_converts_minutes_and_seconds() {
        assert_eq!(toi_minutes("22:45"), 22.75);
        assert_eq!(toi_minutes("0:30"), 0.5);
        assert_eq!(toi_minutes("60:00"), 60.0);
    }

    #[test]
    fn toi_minutes_empty_input_is_zero() {
        assert_eq!(toi_minutes(""), 0.0);
    }

    #[test]
    fn toi_minutes_malformed_input_is_zero() {
        assert_eq!(toi_minutes("junk"), 0.0);
        assert_eq!(toi_minutes("22"), 0.0);
        assert_eq!(toi_minutes("a:b"), 0.0);
    }

    #[test]
    fn toi_minutes_accepts_out_of_range_seconds() {
        // Not validated on purpose; upstream sometimes reports raw values.
        assert_eq!(toi_minutes("10:75"), 11.25);
        assert_eq!(toi_minutes("-5:30"), -4.5);
    }

    #[test]
    fn display_date_adds_one_day() {
        assert_eq!(display_date("2023-10-15"), "Oct 16");
        assert_eq!(display_date("2023-10-31"), "Nov 1");
        assert_eq!(display_date("2023-12-31"), "Jan 1");
    }

    #[test]
    fn display_date_handles_datetimes_the_same_way() {
        assert_eq!(display_date("2023-10-15T19:00:00Z"), "Oct 16");
        assert_eq!(display_date("2023-10-15T19:00:00"), "Oct 16");
    }

    #[test]
    fn display_date_invalid_input_is_marked_not_thrown() {
        assert_eq!(display_date("not-a-date"), INVALID_DATE);
        assert_eq!(display_date(""), INVALID_DATE);
        assert_eq!(display_date("2023-13-40"), INVALID_DATE);
    }

    fn entry(date: &str, opponent: &str, toi: &str) -> GameLogEntry {
        GameLogEntry {
            game_id: "2023020001".into(),
            game_date: date.into(),
            opponent: opponent.into(),
            time_on_ice: toi.into(),
            even_time_on_ice: "15:00".into(),
            power_play_time_on_ice: "04:30".into(),
            shorthanded_time_on_ice: "01:15".into(),
            shifts: 24,
        }
    }

    #[test]
    fn game_records_resolve_opponent_and_convert_toi() {
        let log = GameLog {
            player_id: 8478402,
            player_name: "Connor McDavid".into(),
            game_type: 2,
            games: vec![
                entry("2023-10-15", "vs TOR", "22:45"),
                entry("2023-10-13", "@ Vancouver Canucks", "19:30"),
            ],
        };
        let records = game_records(&log);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].opponent_abbrev, "TOR");
        assert_eq!(records[0].toi_minutes, 22.75);
        assert_eq!(records[0].date_label, "Oct 16");
        assert_eq!(records[1].opponent_abbrev, "VAN");
        assert_eq!(records[1].opponent, "@ Vancouver Canucks");
    }

    #[test]
    fn rolling_average_uses_a_trailing_window() {
        let minutes = [20.0, 10.0, 30.0, 40.0];
        assert_eq!(rolling_average(&minutes, 2), vec![15.0, 20.0, 35.0, 40.0]);
    }

    #[test]
    fn rolling_average_handles_short_input() {
        assert_eq!(rolling_average(&[], 5), Vec::<f64>::new());
        assert_eq!(rolling_average(&[12.0], 5), vec![12.0]);
    }

    #[test]
    fn average_minutes_over_records() {
        let log = GameLog {
            games: vec![entry("2023-10-15", "vs TOR", "20:00"), entry("2023-10-13", "vs BOS", "10:00")],
            ..Default::default()
        };
        let records = game_records(&log);
        assert_eq!(average_minutes(&records), 15.0);
        assert_eq!(average_minutes(&[]), 0.0);
    }
}
