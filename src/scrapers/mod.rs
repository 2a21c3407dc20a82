pub mod fonbet;
pub mod marathon;

use crate::error::SourceError;
use crate::models::{MatchRecord, Sport};
use crate::utils::builder::{build, RawFields, SourceMeta};
use crate::utils::extract::{self, OddsRange};
use tracing::{info, warn};

/// One league page to scrape: sport hint, display name, URL.
#[derive(Debug, Clone, Copy)]
pub struct LeagueSource {
    pub sport: Sport,
    pub league: &'static str,
    pub url: &'static str,
}

/// A chunk of row text pulled out of a page, with the event id and team
/// names when the site exposes them structurally (data attributes,
/// dedicated team nodes) rather than inside the text.
#[derive(Debug)]
pub struct CandidateBlock {
    pub id: Option<String>,
    pub teams: Option<(String, String)>,
    pub text: String,
}

/// Capability interface for a bookmaker site.
///
/// Site markup changes without notice; an adapter only locates candidate
/// row blocks, so a selector change stays a localized adapter edit. All
/// field extraction and validation is shared.
pub trait SiteAdapter {
    fn bookmaker(&self) -> &'static str;
    fn client(&self) -> &reqwest::Client;
    fn sources(&self) -> &'static [LeagueSource];
    fn candidate_blocks(&self, html: &str) -> Vec<CandidateBlock>;
}

/// Scrape every league source of an adapter into normalized records.
///
/// A page that fails to fetch or yields nothing is logged and skipped; the
/// whole source only errors when no page produced a single record.
pub async fn scrape_site<A: SiteAdapter>(adapter: &A) -> Result<Vec<MatchRecord>, SourceError> {
    let mut records = Vec::new();
    let mut pages_reached = 0usize;

    for source in adapter.sources() {
        info!("{}: fetching {}", adapter.bookmaker(), source.league);
        let html = match fetch_page(adapter.client(), source.url).await {
            Ok(html) => {
                pages_reached += 1;
                html
            }
            Err(e) => {
                warn!("{}: {} skipped: {}", adapter.bookmaker(), source.league, e);
                continue;
            }
        };

        let found = parse_page(adapter, source, &html);
        info!("{}: {} matches in {}", adapter.bookmaker(), found.len(), source.league);
        records.extend(found);
    }

    if records.is_empty() {
        if pages_reached == 0 {
            return Err(SourceError::Unreachable(format!(
                "no {} page reachable",
                adapter.bookmaker()
            )));
        }
        return Err(SourceError::NoMatches);
    }
    Ok(records)
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.text().await
}

fn parse_page<A: SiteAdapter>(
    adapter: &A,
    source: &LeagueSource,
    html: &str,
) -> Vec<MatchRecord> {
    let meta = SourceMeta {
        bookmaker: Some(adapter.bookmaker().to_string()),
        match_url: Some(source.url.to_string()),
    };

    adapter
        .candidate_blocks(html)
        .into_iter()
        .filter_map(|block| {
            let (team1, team2) = block
                .teams
                .or_else(|| extract::extract_teams(&block.text))?;
            let id = block.id.or_else(|| extract::extract_event_id(&block.text));
            let raw = RawFields {
                league: source.league.to_string(),
                id,
                date: extract::extract_date(&block.text),
                time: extract::extract_time(&block.text),
                team1,
                team2,
                odds: extract::extract_odds(&block.text, OddsRange::BOOKMAKER),
            };
            build(raw, Some(source.sport), &meta)
        })
        .collect()
}

/// Shared browser-like client for scraper adapters.
pub(crate) fn scraper_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        )
        .timeout(std::time::Duration::from_secs(25))
        .build()
        .unwrap()
}
