use crate::models::{MatchRecord, Sport, ODDS_PLACEHOLDER};
use crate::utils::classify::classify;
use crate::utils::extract;

/// Fields pulled out of one source row, before validation.
#[derive(Debug, Default)]
pub struct RawFields {
    pub league: String,
    pub id: Option<String>,
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub odds: Vec<f64>,
}

/// Provenance attached to every record built from a given source.
#[derive(Debug, Clone, Default)]
pub struct SourceMeta {
    pub bookmaker: Option<String>,
    pub match_url: Option<String>,
}

fn format_odd(value: f64) -> String {
    format!("{:.2}", value)
}

fn odd_or_placeholder(odds: &[f64], idx: usize) -> String {
    odds.get(idx).map(|v| format_odd(*v)).unwrap_or_else(|| ODDS_PLACEHOLDER.to_string())
}

/// Alphabetic 3-character prefix of a team name, uppercased.
fn team_prefix(name: &str) -> String {
    let prefix: String = name
        .chars()
        .filter(|c| c.is_alphabetic())
        .take(3)
        .flat_map(char::to_uppercase)
        .collect();
    if prefix.is_empty() {
        "XXX".to_string()
    } else {
        prefix
    }
}

/// Synthesize a stable id for sources without a native one.
///
/// Built only from the row's own fields, so repeated runs over the same
/// input produce the same id and dedup keeps working across runs.
pub fn synthesize_id(team1: &str, team2: &str, date: &str, time: &str) -> String {
    let mut stamp: String = date
        .chars()
        .chain(time.chars())
        .filter(|c| c.is_ascii_digit())
        .collect();
    if stamp.is_empty() {
        stamp = "0000".to_string();
    }
    format!("{}_{}_{}", team_prefix(team1), team_prefix(team2), stamp)
}

/// Assemble a canonical record, or `None` if the row fails validation.
///
/// The sport hint from the source section wins over league classification.
/// Two-outcome sports get the placeholder in the draw and double-chance
/// columns regardless of how many odds were extracted.
pub fn build(raw: RawFields, sport_hint: Option<Sport>, meta: &SourceMeta) -> Option<MatchRecord> {
    let league = extract::normalize_space(&raw.league);
    if league.is_empty() {
        return None;
    }

    // Names may still carry glued date/time fragments when they come from a
    // spreadsheet column rather than the extractor.
    let (team1, team2) = extract::extract_teams(&format!("{} - {}", raw.team1, raw.team2))?;

    let sport = sport_hint.unwrap_or_else(|| classify(&league));
    if raw.odds.len() < sport.min_odds() {
        return None;
    }

    let id = match raw.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id.trim().to_string(),
        None => synthesize_id(&team1, &team2, &raw.date, &raw.time),
    };

    let record = if sport.is_two_outcome() {
        MatchRecord {
            sport,
            league,
            id,
            date: raw.date,
            time: raw.time,
            team1,
            team2,
            p1: odd_or_placeholder(&raw.odds, 0),
            x: ODDS_PLACEHOLDER.to_string(),
            p2: odd_or_placeholder(&raw.odds, 1),
            p1x: ODDS_PLACEHOLDER.to_string(),
            p12: ODDS_PLACEHOLDER.to_string(),
            px2: ODDS_PLACEHOLDER.to_string(),
            match_url: meta.match_url.clone(),
            source: meta.bookmaker.clone(),
        }
    } else {
        MatchRecord {
            sport,
            league,
            id,
            date: raw.date,
            time: raw.time,
            team1,
            team2,
            p1: odd_or_placeholder(&raw.odds, 0),
            x: odd_or_placeholder(&raw.odds, 1),
            p2: odd_or_placeholder(&raw.odds, 2),
            p1x: odd_or_placeholder(&raw.odds, 3),
            p12: odd_or_placeholder(&raw.odds, 4),
            px2: odd_or_placeholder(&raw.odds, 5),
            match_url: meta.match_url.clone(),
            source: meta.bookmaker.clone(),
        }
    };

    Some(record)
}
