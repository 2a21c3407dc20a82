use crate::error::SourceError;
use crate::models::{MatchRecord, Sport, ODDS_PLACEHOLDER};
use crate::utils::builder::synthesize_id;
use crate::utils::classify::classify;
use crate::utils::extract;
use std::time::Duration;
use tracing::{info, warn};

const DASH: &str = "—";

/// Expected column layout, legacy positional order. Header-name detection is
/// tried first; sheets predating the header row fall back to these indices.
const LEGACY_COLUMNS: usize = 12;

/// Client for the public CSV export of the odds spreadsheet.
pub struct SheetsCsvClient {
    client: reqwest::Client,
    sheet_id: String,
    gid: String,
}

impl SheetsCsvClient {
    pub fn new(sheet_id: impl Into<String>, gid: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 matchfeed-bot/1.0")
                .timeout(Duration::from_secs(25))
                .build()
                .unwrap(),
            sheet_id: sheet_id.into(),
            gid: gid.into(),
        }
    }

    pub fn export_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.sheet_id, self.gid
        )
    }

    /// Download the CSV export, retrying a few times with a growing delay.
    pub async fn fetch_csv(&self) -> Result<String, SourceError> {
        const MAX_RETRIES: u32 = 3;
        let url = self.export_url();

        let mut last_err = String::new();
        for attempt in 1..=MAX_RETRIES {
            info!("[{}/{}] loading sheet csv", attempt, MAX_RETRIES);
            match self.try_fetch(&url).await {
                Ok(content) if !content.trim().is_empty() => {
                    info!("loaded {} bytes", content.len());
                    return Ok(content);
                }
                Ok(_) => {
                    warn!("empty response from sheet export");
                    last_err = "empty response".to_string();
                }
                Err(e) => {
                    warn!("attempt {} failed: {}", attempt, e);
                    last_err = e.to_string();
                }
            }
            if attempt < MAX_RETRIES {
                tokio::time::sleep(Duration::from_secs(5 * attempt as u64)).await;
            }
        }
        Err(SourceError::Unreachable(last_err))
    }

    async fn try_fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    /// Fetch and parse the sheet into validated records.
    pub async fn fetch_matches(&self) -> Result<Vec<MatchRecord>, SourceError> {
        let csv_content = self.fetch_csv().await?;
        let matches = parse_sheet_csv(&csv_content)?;
        if matches.is_empty() {
            return Err(SourceError::NoMatches);
        }
        Ok(matches)
    }
}

/// Column indices for one sheet layout.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    league: usize,
    id: usize,
    date: usize,
    time: usize,
    team1: usize,
    team2: usize,
    odds: [usize; 6],
    match_url: Option<usize>,
}

impl ColumnMap {
    fn legacy() -> Self {
        Self {
            league: 0,
            id: 1,
            date: 2,
            time: 3,
            team1: 4,
            team2: 5,
            odds: [6, 7, 8, 9, 10, 11],
            match_url: Some(12),
        }
    }

    /// Detect columns by header name; sheet versions differ in order and the
    /// headers appear in either language.
    fn from_header(header: &csv::StringRecord) -> Option<Self> {
        let find = |names: &[&str]| -> Option<usize> {
            header.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h == *n)
            })
        };

        Some(Self {
            league: find(&["league", "лига", "турнир"])?,
            id: find(&["id", "match_id", "ид"])?,
            date: find(&["date", "дата"])?,
            time: find(&["time", "время"])?,
            team1: find(&["team1", "команда 1", "команда1"])?,
            team2: find(&["team2", "команда 2", "команда2"])?,
            odds: [
                find(&["p1", "1", "п1"])?,
                find(&["x", "х"])?,
                find(&["p2", "2", "п2"])?,
                find(&["p1x", "1x", "1х"])?,
                find(&["p12", "12"])?,
                find(&["px2", "x2", "х2"])?,
            ],
            match_url: find(&["match_url", "url", "ссылка"]),
        })
    }
}

fn norm(field: Option<&str>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// A single odds cell is usable when it parses into the wide plausible range.
/// `allow_dash` accepts the draw-less marker used by tennis/MMA rows.
fn is_valid_odd(value: &str, allow_dash: bool) -> bool {
    let s = value.trim();
    if s.is_empty() || s == ODDS_PLACEHOLDER {
        return false;
    }
    if allow_dash && s == DASH {
        return true;
    }
    s.replace(',', ".")
        .parse::<f64>()
        .map(|v| extract::OddsRange::WIDE.contains(v) && v >= 1.01)
        .unwrap_or(false)
}

/// Normalize an odds cell: dash and junk become the canonical placeholder,
/// valid values are reformatted to two decimals.
fn normalize_odd(value: &str) -> String {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| extract::OddsRange::WIDE.contains(*v))
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| ODDS_PLACEHOLDER.to_string())
}

/// Row-level validation, mirroring what the curated sheet guarantees:
/// main odds must be real for three-outcome sports; draw-less sports only
/// need both win odds; three-outcome rows need at least two usable
/// double-chance odds.
fn is_valid_row(sport: Sport, odds: &[String; 6]) -> bool {
    let [p1, x, p2, p1x, p12, px2] = odds;
    if sport.is_two_outcome() {
        is_valid_odd(p1, false) && is_valid_odd(p2, true)
    } else {
        if !(is_valid_odd(p1, false) && is_valid_odd(x, false) && is_valid_odd(p2, false)) {
            return false;
        }
        let combos = [p1x, p12, px2]
            .iter()
            .filter(|c| is_valid_odd(c, false))
            .count();
        combos >= 2
    }
}

/// Parse the sheet CSV into records. Malformed rows are skipped, never fatal;
/// skip counts are logged for the run summary.
pub fn parse_sheet_csv(content: &str) -> Result<Vec<MatchRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();
    let header = match rows.next() {
        Some(row) => row?,
        None => return Ok(Vec::new()),
    };

    let (columns, header_detected) = match ColumnMap::from_header(&header) {
        Some(map) => (map, true),
        None => (ColumnMap::legacy(), false),
    };
    if !header_detected {
        info!("no recognizable header row, using legacy column order");
    }

    let mut matches = Vec::new();
    let mut skipped = 0usize;

    // With no header row the first line is data too.
    let first_data: Vec<csv::StringRecord> = if header_detected {
        Vec::new()
    } else {
        vec![header]
    };

    for row in first_data.into_iter().map(Ok).chain(rows) {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                warn!("unreadable csv row: {}", e);
                skipped += 1;
                continue;
            }
        };
        match parse_row(&row, &columns) {
            Some(record) => matches.push(record),
            None => skipped += 1,
        }
    }

    info!("parsed {} matches ({} rows skipped)", matches.len(), skipped);
    Ok(matches)
}

fn parse_row(row: &csv::StringRecord, columns: &ColumnMap) -> Option<MatchRecord> {
    if row.len() < LEGACY_COLUMNS {
        return None;
    }

    let league = norm(row.get(columns.league));
    if league.is_empty() {
        return None;
    }

    // Date/time fragments sometimes end up glued into the team cells.
    let (team1, team2) = extract::extract_teams(&format!(
        "{} - {}",
        norm(row.get(columns.team1)),
        norm(row.get(columns.team2))
    ))?;

    let odds: [String; 6] = columns.odds.map(|i| norm(row.get(i)));
    let sport = classify(&league);
    if !is_valid_row(sport, &odds) {
        return None;
    }

    let date = norm(row.get(columns.date));
    let time = norm(row.get(columns.time));
    let id = {
        let native = norm(row.get(columns.id));
        if native.is_empty() {
            synthesize_id(&team1, &team2, &date, &time)
        } else {
            native
        }
    };
    let match_url = columns
        .match_url
        .map(|i| norm(row.get(i)))
        .filter(|u| !u.is_empty());

    let [p1, x, p2, p1x, p12, px2] = odds;
    let (x, p1x, p12, px2) = if sport.is_two_outcome() {
        (
            ODDS_PLACEHOLDER.to_string(),
            ODDS_PLACEHOLDER.to_string(),
            ODDS_PLACEHOLDER.to_string(),
            ODDS_PLACEHOLDER.to_string(),
        )
    } else {
        (
            normalize_odd(&x),
            normalize_odd(&p1x),
            normalize_odd(&p12),
            normalize_odd(&px2),
        )
    };

    Some(MatchRecord {
        sport,
        league,
        id,
        date,
        time,
        team1,
        team2,
        p1: normalize_odd(&p1),
        x,
        p2: normalize_odd(&p2),
        p1x,
        p12,
        px2,
        match_url,
        source: Some("sheets".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERED: &str = "\
league,id,date,time,team1,team2,p1,x,p2,p1x,p12,px2,match_url
Россия. Премьер-лига,РПЛ_1,17 фев,20:45,Спартак,Динамо,2.10,3.40,3.50,1.30,1.25,1.70,https://example.com/1
КХЛ,КХЛ_2,18 фев,19:30,СКА,ЦСКА,1.85,4.20,3.90,1.40,1.20,1.95,
ATP. Miami,ATP_3,19 фев,14:00,Медведев,Алькарас,2.40,—,1.55,—,—,—,
";

    #[test]
    fn parses_headered_sheet() {
        let matches = parse_sheet_csv(HEADERED).unwrap();
        assert_eq!(matches.len(), 3);

        let rpl = &matches[0];
        assert_eq!(rpl.sport, Sport::Football);
        assert_eq!(rpl.team1, "Спартак");
        assert_eq!(rpl.team2, "Динамо");
        assert_eq!(rpl.p1, "2.10");
        assert_eq!(rpl.match_url.as_deref(), Some("https://example.com/1"));

        let tennis = &matches[2];
        assert_eq!(tennis.sport, Sport::Tennis);
        assert_eq!(tennis.x, ODDS_PLACEHOLDER);
        assert_eq!(tennis.p1x, ODDS_PLACEHOLDER);
        assert_eq!(tennis.p1, "2.40");
        assert_eq!(tennis.p2, "1.55");
    }

    #[test]
    fn reordered_columns_are_detected_by_header() {
        let csv = "\
id,league,team1,team2,date,time,p1,x,p2,p1x,p12,px2
АПЛ_9,Англия. Премьер-лига,Арсенал,Челси,20 фев,18:00,2.05,3.30,3.80,1.28,1.31,1.77
";
        let matches = parse_sheet_csv(csv).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "АПЛ_9");
        assert_eq!(matches[0].league, "Англия. Премьер-лига");
        assert_eq!(matches[0].team1, "Арсенал");
    }

    #[test]
    fn headerless_sheet_uses_positional_fallback() {
        let csv = "\
КХЛ,КХЛ_7,18 фев,19:30,Ак Барс,Авангард,1.85,4.20,3.90,1.40,1.20,1.95
";
        let matches = parse_sheet_csv(csv).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].sport, Sport::Hockey);
        assert_eq!(matches[0].id, "КХЛ_7");
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let csv = "\
league,id,date,time,team1,team2,p1,x,p2,p1x,p12,px2
,X_1,17 фев,20:00,Спартак,Динамо,2.10,3.40,3.50,1.30,1.25,1.70
Россия. Премьер-лига,X_2,17 фев,20:00,АВ,Динамо,2.10,3.40,3.50,1.30,1.25,1.70
Россия. Премьер-лига,X_3,17 фев,20:00,Спартак,Динамо,0.00,3.40,3.50,1.30,1.25,1.70
Россия. Премьер-лига,X_4,17 фев,20:00,Спартак,Динамо,2.10,3.40,3.50,0.00,0.00,1.70
Россия. Премьер-лига,X_5,17 фев,20:00,Спартак,Динамо,2.10,3.40,3.50,1.30,1.25,1.70
";
        let matches = parse_sheet_csv(csv).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "X_5");
    }

    #[test]
    fn glued_datetime_is_stripped_from_team_cells() {
        let csv = "\
league,id,date,time,team1,team2,p1,x,p2,p1x,p12,px2
КХЛ,КХЛ_8,18 фев,19:30,Ак Барс 18 фев 19:30,Авангард,1.85,4.20,3.90,1.40,1.20,1.95
";
        let matches = parse_sheet_csv(csv).unwrap();
        assert_eq!(matches[0].team1, "Ак Барс");
    }

    #[test]
    fn missing_id_is_synthesized_and_stable() {
        let csv = "\
league,id,date,time,team1,team2,p1,x,p2,p1x,p12,px2
КХЛ,,18 фев,19:30,Ак Барс,Авангард,1.85,4.20,3.90,1.40,1.20,1.95
";
        let a = parse_sheet_csv(csv).unwrap();
        let b = parse_sheet_csv(csv).unwrap();
        assert!(!a[0].id.is_empty());
        assert_eq!(a[0].id, b[0].id);
    }

    #[test]
    fn odds_normalization() {
        assert!(is_valid_odd("2.10", false));
        assert!(!is_valid_odd("0.00", false));
        assert!(!is_valid_odd("", false));
        assert!(!is_valid_odd("—", false));
        assert!(is_valid_odd("—", true));
        assert!(!is_valid_odd("1000.5", false));
        assert_eq!(normalize_odd("—"), ODDS_PLACEHOLDER);
        assert_eq!(normalize_odd("2,1"), "2.10");
    }
}
