//! Team color profiles for the renderer: each team's primary/secondary/
//! tertiary hex colors plus a "neobrutalist" variant of each — saturation
//! pushed up and dark colors brightened — and a dark-text contrast flag.
//!
//! The table is built once at startup and never mutated. Monochrome accents
//! (pure black/white and the near-black inks) keep their literal value; a
//! saturation boost on those only produces muddy grays.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::teams::DEFAULT_TEAM;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamColorProfile {
    pub primary: String,
    pub secondary: String,
    pub tertiary: Option<String>,
    pub neo_primary: String,
    pub neo_secondary: String,
    pub neo_tertiary: Option<String>,
    pub dark_text: bool,
}

struct ColorSpec {
    abbrev: &'static str,
    primary: &'static str,
    secondary: &'static str,
    tertiary: Option<&'static str>,
    // Literal overrides for accents that should not be saturated.
    neo_primary: Option<&'static str>,
    neo_secondary: Option<&'static str>,
    neo_tertiary: Option<&'static str>,
    dark_text: bool,
}

#[rustfmt::skip]
static COLOR_SPECS: &[ColorSpec] = &[
    ColorSpec { abbrev: "ANA", primary: "#F47A38", secondary: "#B9975B", tertiary: Some("#000000"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#000000"), dark_text: true },
    ColorSpec { abbrev: "ARI", primary: "#8C2633", secondary: "#E2D6B5", tertiary: Some("#111111"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#111111"), dark_text: false },
    ColorSpec { abbrev: "BOS", primary: "#FFB81C", secondary: "#000000", tertiary: None, neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: None, dark_text: true },
    ColorSpec { abbrev: "BUF", primary: "#002654", secondary: "#FCB514", tertiary: Some("#ADAFAA"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "CGY", primary: "#C8102E", secondary: "#F1BE48", tertiary: Some("#111111"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#111111"), dark_text: false },
    ColorSpec { abbrev: "CAR", primary: "#CC0000", secondary: "#000000", tertiary: Some("#A4A9AD"), neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "CHI", primary: "#CF0A2C", secondary: "#000000", tertiary: Some("#FFD100"), neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "COL", primary: "#6F263D", secondary: "#236192", tertiary: Some("#A2AAAD"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "CBJ", primary: "#002654", secondary: "#CE1126", tertiary: Some("#A4A9AD"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "DAL", primary: "#006847", secondary: "#8F8F8C", tertiary: Some("#111111"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#111111"), dark_text: false },
    ColorSpec { abbrev: "DET", primary: "#CE1126", secondary: "#FFFFFF", tertiary: None, neo_primary: None, neo_secondary: Some("#FFFFFF"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "EDM", primary: "#041E42", secondary: "#FF4C00", tertiary: None, neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "FLA", primary: "#041E42", secondary: "#C8102E", tertiary: Some("#B9975B"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    // LAK and PIT: primaries are (near) black, lightened literally instead.
    ColorSpec { abbrev: "LAK", primary: "#111111", secondary: "#A2AAAD", tertiary: Some("#FFFFFF"), neo_primary: Some("#333333"), neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "MIN", primary: "#154734", secondary: "#A6192E", tertiary: Some("#DDCBA4"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "MTL", primary: "#AF1E2D", secondary: "#192168", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "NSH", primary: "#FFB81C", secondary: "#041E42", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: true },
    ColorSpec { abbrev: "NJD", primary: "#CE1126", secondary: "#000000", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "NYI", primary: "#00539B", secondary: "#F47D30", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "NYR", primary: "#0038A8", secondary: "#CE1126", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "OTT", primary: "#E31837", secondary: "#C69214", tertiary: Some("#000000"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#000000"), dark_text: false },
    ColorSpec { abbrev: "PHI", primary: "#F74902", secondary: "#000000", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "PIT", primary: "#000000", secondary: "#FCB514", tertiary: Some("#CFC493"), neo_primary: Some("#333333"), neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "SJS", primary: "#006D75", secondary: "#000000", tertiary: Some("#EA7200"), neo_primary: None, neo_secondary: Some("#000000"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "SEA", primary: "#99D9D9", secondary: "#001F5B", tertiary: Some("#E9072B"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: true },
    ColorSpec { abbrev: "STL", primary: "#002F87", secondary: "#FCB514", tertiary: Some("#041E42"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "TBL", primary: "#002868", secondary: "#FFFFFF", tertiary: Some("#00205B"), neo_primary: None, neo_secondary: Some("#FFFFFF"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "TOR", primary: "#00205B", secondary: "#FFFFFF", tertiary: None, neo_primary: None, neo_secondary: Some("#FFFFFF"), neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "VAN", primary: "#00205B", secondary: "#00843D", tertiary: Some("#041C2C"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
    ColorSpec { abbrev: "VGK", primary: "#B4975A", secondary: "#333F42", tertiary: Some("#C8102E"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: true },
    ColorSpec { abbrev: "WSH", primary: "#C8102E", secondary: "#041E42", tertiary: Some("#FFFFFF"), neo_primary: None, neo_secondary: None, neo_tertiary: Some("#FFFFFF"), dark_text: false },
    ColorSpec { abbrev: "WPG", primary: "#041E42", secondary: "#004C97", tertiary: Some("#AC162C"), neo_primary: None, neo_secondary: None, neo_tertiary: None, dark_text: false },
];

static PROFILES: Lazy<HashMap<&'static str, TeamColorProfile>> = Lazy::new(|| {
    COLOR_SPECS
        .iter()
        .map(|s| {
            let profile = TeamColorProfile {
                primary: s.primary.to_owned(),
                secondary: s.secondary.to_owned(),
                tertiary: s.tertiary.map(str::to_owned),
                neo_primary: s
                    .neo_primary
                    .map(str::to_owned)
                    .unwrap_or_else(|| neobrutalize(s.primary)),
                neo_secondary: s
                    .neo_secondary
                    .map(str::to_owned)
                    .unwrap_or_else(|| neobrutalize(s.secondary)),
                neo_tertiary: match (s.neo_tertiary, s.tertiary) {
                    (Some(literal), _) => Some(literal.to_owned()),
                    (None, Some(base)) => Some(neobrutalize(base)),
                    (None, None) => None,
                },
                dark_text: s.dark_text,
            };
            (s.abbrev, profile)
        })
        .collect()
});

/// Look up a team's color profile; unknown abbreviations get the default
/// team's colors so the renderer always has something usable.
pub fn team_colors(abbrev: &str) -> &'static TeamColorProfile {
    let upper = abbrev.to_ascii_uppercase();
    PROFILES
        .get(upper.as_str())
        .unwrap_or_else(|| &PROFILES[DEFAULT_TEAM])
}

/// "#RRGGBB" → (r, g, b). Returns None for anything else.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Perceived-brightness check (YIQ): bright backgrounds want dark text.
pub fn uses_dark_text(hex: &str) -> bool {
    let Some((r, g, b)) = parse_hex(hex) else {
        return false;
    };
    let yiq = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    yiq >= 128
}

/// Saturate and brighten a color for the neobrutalist style: +20% saturation,
/// and dark colors get their lightness raised so they read on a dark terminal.
fn neobrutalize(hex: &str) -> String {
    let Some((r, g, b)) = parse_hex(hex) else {
        return hex.to_owned();
    };

    let (h, mut s, mut l) = rgb_to_hsl(r, g, b);
    s = (s * 1.2).min(1.0);
    if l < 0.5 {
        l = (l * 1.3 + 0.1).min(0.9);
    }

    let (r2, g2, b2) = hsl_to_rgb(h, s, l);
    format!("#{r2:02x}{g2:02x}{b2:02x}")
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l); // achromatic
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0).round().clamp(0.0, 255.0) as u8;
        return (v, v, v); // achromatic
    }

    let hue2rgb = |p: f64, q: f64, mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    };

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let to_channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    (
        to_channel(hue2rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue2rgb(p, q, h)),
        to_channel(hue2rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::TEAMS;

    fn lightness(hex: &str) -> f64 {
        let (r, g, b) = parse_hex(hex).unwrap();
        rgb_to_hsl(r, g, b).2
    }

    fn saturation(hex: &str) -> f64 {
        let (r, g, b) = parse_hex(hex).unwrap();
        rgb_to_hsl(r, g, b).1
    }

    #[test]
    fn every_team_has_a_profile() {
        for team in TEAMS {
            let profile = team_colors(team.abbrev);
            assert!(parse_hex(&profile.primary).is_some(), "{}", team.abbrev);
            assert!(parse_hex(&profile.neo_primary).is_some(), "{}", team.abbrev);
        }
    }

    #[test]
    fn unknown_abbreviation_falls_back_to_default() {
        assert_eq!(team_colors("XXX"), team_colors(DEFAULT_TEAM));
        assert_eq!(team_colors("edm"), team_colors("EDM"));
    }

    #[test]
    fn neobrutalize_brightens_dark_colors() {
        // Oilers navy is well below 50% lightness; the variant must rise.
        let base = "#041E42";
        let neo = neobrutalize(base);
        assert!(lightness(&neo) > lightness(base), "{base} -> {neo}");
    }

    #[test]
    fn neobrutalize_saturates_without_overflowing() {
        let neo = neobrutalize("#F47A38");
        assert!(saturation(&neo) >= saturation("#F47A38") - 0.01);
        assert!(parse_hex(&neo).is_some());
    }

    #[test]
    fn monochrome_overrides_stay_literal() {
        assert_eq!(team_colors("LAK").neo_primary, "#333333");
        assert_eq!(team_colors("PIT").neo_primary, "#333333");
        assert_eq!(team_colors("TOR").neo_secondary, "#FFFFFF");
        assert_eq!(team_colors("BOS").neo_secondary, "#000000");
    }

    #[test]
    fn contrast_flag_follows_brightness() {
        assert!(uses_dark_text("#FFFFFF"));
        assert!(uses_dark_text("#FFB81C"));
        assert!(!uses_dark_text("#000000"));
        assert!(!uses_dark_text("#041E42"));
    }

    #[test]
    fn parse_hex_rejects_malformed_input() {
        assert_eq!(parse_hex("#F47A38"), Some((0xF4, 0x7A, 0x38)));
        assert!(parse_hex("F47A38").is_none());
        assert!(parse_hex("#F47").is_none());
        assert!(parse_hex("#GGGGGG").is_none());
    }
}
