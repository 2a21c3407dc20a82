use serde::{Deserialize, Serialize};

/// Canonical placeholder for odds that are absent or not applicable.
/// Scraped sources also emit "—" for draw-less sports; input normalizes to this.
pub const ODDS_PLACEHOLDER: &str = "0.00";

/// Sport category a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Hockey,
    Basket,
    Tennis,
    Esports,
    Volleyball,
    Mma,
    Other,
}

impl Sport {
    /// Sports with no draw outcome: the X column and all double-chance
    /// columns carry the placeholder.
    pub fn is_two_outcome(self) -> bool {
        matches!(
            self,
            Sport::Tennis | Sport::Mma | Sport::Basket | Sport::Esports
        )
    }

    /// Minimum number of extracted odds required to build a record.
    pub fn min_odds(self) -> usize {
        if self.is_two_outcome() {
            2
        } else {
            3
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Hockey => "hockey",
            Sport::Basket => "basket",
            Sport::Tennis => "tennis",
            Sport::Esports => "esports",
            Sport::Volleyball => "volleyball",
            Sport::Mma => "mma",
            Sport::Other => "other",
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized sporting event with its odds.
///
/// `(sport, id)` is the dedup key. Odds fields are always present: missing
/// data is the placeholder string, never a null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub sport: Sport,
    pub league: String,
    pub id: String,
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub p1: String,
    pub x: String,
    pub p2: String,
    pub p1x: String,
    pub p12: String,
    pub px2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl MatchRecord {
    /// Dedup key within a published collection.
    pub fn key(&self) -> (Sport, &str) {
        (self.sport, self.id.as_str())
    }
}

/// Timestamped wrapper written to each JSON sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCollection {
    pub last_update: String,
    pub source: String,
    pub total: usize,
    pub matches: Vec<MatchRecord>,
}

impl MatchCollection {
    /// Stamps `last_update` with the current UTC time; `total` and
    /// `matches.len()` agree by construction.
    pub fn new(source: impl Into<String>, matches: Vec<MatchRecord>) -> Self {
        Self {
            last_update: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.into(),
            total: matches.len(),
            matches,
        }
    }
}
