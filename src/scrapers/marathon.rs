use super::{scraper_client, CandidateBlock, LeagueSource, SiteAdapter};
use crate::models::Sport;
use crate::utils::extract::normalize_space;
use scraper::{Html, Selector};

const BASE: &str = "https://www.marathonbet.ru";

/// Popular league pages. The popular-section index itself intermittently
/// 404s, so individual league URLs are pinned here.
static SOURCES: &[LeagueSource] = &[
    LeagueSource {
        sport: Sport::Football,
        league: "Англия. Премьер-лига",
        url: "https://www.marathonbet.ru/su/popular/Football/England/Premier%2BLeague%2B-%2B21520",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Испания. Ла Лига",
        url: "https://www.marathonbet.ru/su/popular/Football/Spain/Primera%2BDivision%2B-%2B8736",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Италия. Серия A",
        url: "https://www.marathonbet.ru/su/popular/Football/Italy/Serie%2BA%2B-%2B22434",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Германия. Бундеслига",
        url: "https://www.marathonbet.ru/su/popular/Football/Germany/Bundesliga%2B-%2B22436",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Франция. Лига 1",
        url: "https://www.marathonbet.ru/su/popular/Football/France/Ligue%2B1%2B-%2B21533",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Лига чемпионов УЕФА",
        url: "https://www.marathonbet.ru/su/popular/Football/UEFA/Champions%2BLeague%2B-%2B52287",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Лига Европы УЕФА",
        url: "https://www.marathonbet.ru/su/popular/Football/UEFA/Europa%2BLeague%2B-%2B14",
    },
    LeagueSource {
        sport: Sport::Hockey,
        league: "КХЛ",
        url: "https://www.marathonbet.ru/su/popular/Ice%2BHockey/KHL%2B-%2B52309",
    },
    LeagueSource {
        sport: Sport::Hockey,
        league: "NHL",
        url: "https://www.marathonbet.ru/su/popular/Ice%2BHockey/NHL%2B-%2B69368",
    },
    LeagueSource {
        sport: Sport::Basket,
        league: "NBA",
        url: "https://www.marathonbet.ru/su/popular/Basketball/NBA%2B-%2B69367",
    },
    LeagueSource {
        sport: Sport::Basket,
        league: "Евролига",
        url: "https://www.marathonbet.ru/su/popular/Basketball/Euroleague%2B-%2B22469",
    },
    LeagueSource {
        sport: Sport::Esports,
        league: "Dota 2",
        url: "https://www.marathonbet.ru/su/popular/e-Sports/Dota+2/",
    },
    LeagueSource {
        sport: Sport::Esports,
        league: "CS2",
        url: "https://www.marathonbet.ru/su/popular/e-Sports/Counter-Strike+2/",
    },
];

/// Marathon renders one event per `<tr>`; the row text carries a `+NNNN`
/// event id marker, team names in `1. A 2. B` form, and the odds columns.
pub struct MarathonScraper {
    client: reqwest::Client,
}

impl MarathonScraper {
    pub fn new() -> Self {
        Self {
            client: scraper_client(),
        }
    }
}

impl Default for MarathonScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for MarathonScraper {
    fn bookmaker(&self) -> &'static str {
        "marathon"
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn sources(&self) -> &'static [LeagueSource] {
        SOURCES
    }

    fn candidate_blocks(&self, html: &str) -> Vec<CandidateBlock> {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("tr").unwrap();

        document
            .select(&row_selector)
            .filter_map(|row| {
                let text = normalize_space(&row.text().collect::<Vec<_>>().join(" "));
                // Short rows are headers and spacers, not events.
                if text.chars().count() < 20 {
                    return None;
                }
                Some(CandidateBlock {
                    id: None,
                    teams: None,
                    text,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><table>
        <tr><td>Коэффициенты</td></tr>
        <tr>
            <td>1. Спартак</td><td>2. Динамо</td>
            <td>+271201</td><td>17 фев 20:45</td>
            <td>2.10</td><td>3.40</td><td>3.50</td>
            <td>1.30</td><td>1.25</td><td>1.70</td>
        </tr>
        <tr><td>итого</td></tr>
        </table></body></html>
    "#;

    #[test]
    fn candidate_blocks_keep_event_rows() {
        let scraper = MarathonScraper::new();
        let blocks = scraper.candidate_blocks(PAGE);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("1. Спартак"));
        assert!(blocks[0].text.contains("+271201"));
    }

    #[test]
    fn event_row_parses_into_record() {
        let scraper = MarathonScraper::new();
        let source = &SOURCES[0];
        let records = super::super::parse_page(&scraper, source, PAGE);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.id, "271201");
        assert_eq!(rec.team1, "Спартак");
        assert_eq!(rec.team2, "Динамо");
        assert_eq!(rec.date, "17 фев");
        assert_eq!(rec.time, "20:45");
        assert_eq!(rec.p1, "2.10");
        assert_eq!(rec.x, "3.40");
        assert_eq!(rec.p2, "3.50");
        assert_eq!(rec.px2, "1.70");
        assert_eq!(rec.source.as_deref(), Some("marathon"));
        assert_eq!(rec.league, source.league);
    }
}
