pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use config::Config;
pub use error::SourceError;
pub use models::{MatchCollection, MatchRecord, Sport, ODDS_PLACEHOLDER};

use anyhow::{bail, Context, Result};
use api::sheets::SheetsCsvClient;
use scrapers::fonbet::FonbetScraper;
use scrapers::marathon::MarathonScraper;
use scrapers::scrape_site;
use tracing::{info, warn};
use utils::merge::merge;
use utils::sink::{write_collection, write_sheet_rows};
use utils::stats::SummaryStats;

/// Bookmakers that get a dedicated JSON sink.
const BOOKMAKER_SINKS: &[&str] = &["winline", "marathon", "fonbet"];

/// What one sync run produced.
#[derive(Debug)]
pub struct SyncReport {
    /// `(source name, records contributed)`, in merge priority order.
    pub sources: Vec<(String, usize)>,
    pub stats: SummaryStats,
}

/// Attribute a record to a bookmaker sink: explicit source first, then a
/// substring check on the match URL (spreadsheet rows carry the URL of the
/// bookmaker page they were scraped from, not a source tag).
fn bookmaker_of(record: &MatchRecord) -> Option<&'static str> {
    let source = record.source.as_deref().unwrap_or("").to_lowercase();
    let url = record.match_url.as_deref().unwrap_or("").to_lowercase();
    for name in BOOKMAKER_SINKS {
        if source.contains(name) || url.contains(name) {
            return Some(name);
        }
    }
    if url.contains("bkfon") {
        return Some("fonbet");
    }
    None
}

/// Run one full sync: scrape every source, merge, write all sinks.
///
/// Per-source failures are logged and skipped; the run itself only fails
/// when no source contributed anything (or a sink write fails).
pub async fn run_sync(config: &Config) -> Result<SyncReport> {
    let fonbet = FonbetScraper::new();
    let marathon = MarathonScraper::new();
    let sheets = SheetsCsvClient::new(config.sheet_id.clone(), config.sheet_gid.clone());

    // Ascending merge priority: the curated sheet overrides scraped rows
    // on a (sport, id) collision.
    let fetched: Vec<(&str, Result<Vec<MatchRecord>, SourceError>)> = vec![
        ("fonbet", scrape_site(&fonbet).await),
        ("marathon", scrape_site(&marathon).await),
        ("sheets", sheets.fetch_matches().await),
    ];

    let mut lists = Vec::new();
    let mut sources = Vec::new();
    let mut ok_names = Vec::new();
    for (name, result) in fetched {
        match result {
            Ok(records) => {
                info!("{}: {} records", name, records.len());
                sources.push((name.to_string(), records.len()));
                ok_names.push(name.to_string());
                lists.push(records);
            }
            Err(e) => {
                warn!("{}: skipped: {}", name, e);
                sources.push((name.to_string(), 0));
            }
        }
    }

    if lists.is_empty() {
        bail!("no source yielded any data");
    }

    let merged = merge(lists);
    if merged.is_empty() {
        bail!("no matches after merge");
    }

    let collection = MatchCollection::new(ok_names.join(", "), merged);
    write_collection(&collection, &config.matches_path())
        .context("Failed to write matches.json")?;
    info!(
        "wrote {} ({} matches)",
        config.matches_path().display(),
        collection.total
    );

    write_bookmaker_sinks(config, &collection)?;

    if config.write_sheets {
        write_sheet_rows(&collection.matches, &config.sheet_rows_path())
            .context("Failed to write sheet rows mirror")?;
        info!("wrote {}", config.sheet_rows_path().display());
    }

    Ok(SyncReport {
        sources,
        stats: SummaryStats::from_records(&collection.matches),
    })
}

/// Partition the combined collection into one JSON sink per bookmaker.
fn write_bookmaker_sinks(config: &Config, collection: &MatchCollection) -> Result<()> {
    let mut unattributed = 0usize;
    for name in BOOKMAKER_SINKS {
        let matches: Vec<MatchRecord> = collection
            .matches
            .iter()
            .filter(|m| bookmaker_of(m) == Some(name))
            .cloned()
            .collect();
        if matches.is_empty() {
            continue;
        }
        let sub = MatchCollection {
            last_update: collection.last_update.clone(),
            source: name.to_string(),
            total: matches.len(),
            matches,
        };
        write_collection(&sub, &config.bookmaker_path(name))
            .with_context(|| format!("Failed to write {}.json", name))?;
        info!("wrote {}.json ({} matches)", name, sub.total);
    }

    for m in &collection.matches {
        if bookmaker_of(m).is_none() {
            unattributed += 1;
        }
    }
    if unattributed > 0 {
        info!("{} matches with no bookmaker attribution", unattributed);
    }
    Ok(())
}
