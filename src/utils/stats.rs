use crate::models::MatchRecord;
use std::collections::HashMap;
use std::fmt;

/// Console summary of one run: totals with per-sport and per-league breakdown.
#[derive(Debug, Default)]
pub struct SummaryStats {
    pub total: usize,
    pub by_sport: Vec<(String, usize)>,
    pub by_league: Vec<(String, usize)>,
}

impl SummaryStats {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut sports: HashMap<String, usize> = HashMap::new();
        let mut leagues: HashMap<String, usize> = HashMap::new();
        for m in records {
            *sports.entry(m.sport.to_string()).or_default() += 1;
            *leagues.entry(m.league.clone()).or_default() += 1;
        }

        let mut by_sport: Vec<_> = sports.into_iter().collect();
        by_sport.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let mut by_league: Vec<_> = leagues.into_iter().collect();
        by_league.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total: records.len(),
            by_sport,
            by_league,
        }
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total: {} matches, {} leagues",
            self.total,
            self.by_league.len()
        )?;
        for (sport, count) in &self.by_sport {
            writeln!(f, "  {}: {}", sport, count)?;
        }
        writeln!(f, "Top leagues:")?;
        for (league, count) in self.by_league.iter().take(10) {
            writeln!(f, "  {}: {}", league, count)?;
        }
        Ok(())
    }
}
