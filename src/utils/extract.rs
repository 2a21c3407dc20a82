use regex::Regex;
use std::sync::LazyLock;

/// Plausible bounds for a decimal odds token; tokens outside are discarded.
#[derive(Debug, Clone, Copy)]
pub struct OddsRange {
    pub min: f64,
    pub max: f64,
}

impl OddsRange {
    /// Typical bookmaker page range.
    pub const BOOKMAKER: OddsRange = OddsRange {
        min: 1.01,
        max: 100.0,
    };

    /// Wider tables (spreadsheet imports) allow longshot prices.
    pub const WIDE: OddsRange = OddsRange {
        min: 1.0,
        max: 999.99,
    };

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// Row markup glues date/time and odds onto team names; these patterns locate
// and strip those fragments. Month tokens cover Russian and English feeds.
static RE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})\s+(янв|фев|мар|апр|мая|май|июн|июл|авг|сен|окт|ноя|дек|jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
    )
    .unwrap()
});

static RE_TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2}:\d{2})\b").unwrap());

static RE_DATETIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\s+[а-яёА-ЯЁa-zA-Z]{2,4}\s+\d{1,2}:\d{2}").unwrap());

static RE_ODDS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+[.,]\d{1,3})\b").unwrap());

static RE_EVENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+(\d{2,})").unwrap());

static RE_TEAMS_NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"1\.\s*(.+?)\s+2\.\s*(.+?)(?:\s+\+\d|\s+\d{1,2}:\d{2}|\s+\d{1,2}\s+\S+|\s+\d+[.,]\d|$)")
        .unwrap()
});

static RE_TEAMS_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(.{2,}?)\s+(?:-|—|vs\.?|против)\s+(.{2,}?)(?:\s+\d|$)").unwrap()
});

static RE_TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+(?:[.,]\d+)?$").unwrap());

/// Collapse runs of whitespace and trim.
pub fn normalize_space(text: &str) -> String {
    RE_SPACE.replace_all(text.trim(), " ").into_owned()
}

/// Strip date/time fragments, odds glued to the tail, and the `+id` marker
/// from a captured team name.
fn clean_team_name(raw: &str) -> String {
    let mut name = RE_DATETIME.replace_all(raw, "").into_owned();
    name = RE_TIME.replace_all(&name, "").into_owned();
    name = RE_EVENT_ID.replace_all(&name, "").into_owned();
    // Odds may be stacked at the end: strip numeric tokens one by one.
    loop {
        let stripped = RE_TRAILING_NUMBER.replace(name.trim_end(), "").into_owned();
        if stripped == name.trim_end() {
            break;
        }
        name = stripped;
    }
    normalize_space(&name)
}

/// Minimum team-name length gate, in characters (names are often Cyrillic).
fn long_enough(name: &str) -> bool {
    name.chars().count() >= 3
}

/// Find two team names in a block of row text.
///
/// Tries the `"1. A 2. B"` enumeration first, then separator forms
/// (`A - B`, `A vs B`, `A против B`). Returns `None` when either side is
/// shorter than 3 characters after cleanup.
pub fn extract_teams(text: &str) -> Option<(String, String)> {
    let text = normalize_space(text);

    for re in [&*RE_TEAMS_NUMBERED, &*RE_TEAMS_SEPARATOR] {
        if let Some(caps) = re.captures(&text) {
            let team1 = clean_team_name(caps.get(1)?.as_str());
            let team2 = clean_team_name(caps.get(2)?.as_str());
            if long_enough(&team1) && long_enough(&team2) {
                return Some((team1, team2));
            }
        }
    }
    None
}

/// Date token, e.g. `"17 фев"`; empty string when absent.
pub fn extract_date(text: &str) -> String {
    RE_DATE
        .captures(text)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
        .unwrap_or_default()
}

/// Time token, e.g. `"20:45"`; empty string when absent.
pub fn extract_time(text: &str) -> String {
    RE_TIME
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Marathon-style `+NNNN` event id marker.
pub fn extract_event_id(text: &str) -> Option<String> {
    RE_EVENT_ID
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Collect decimal odds tokens in source order, filtered to `range`.
///
/// Only tokens with a fractional part count: bare integers in row text are
/// dates, scores or event ids, never prices. Comma is accepted as the
/// decimal separator.
pub fn extract_odds(text: &str, range: OddsRange) -> Vec<f64> {
    RE_ODDS_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps[1].replace(',', ".").parse::<f64>().ok())
        .filter(|v| range.contains(*v))
        .collect()
}
