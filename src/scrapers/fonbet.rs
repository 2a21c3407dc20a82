use super::{scraper_client, CandidateBlock, LeagueSource, SiteAdapter};
use crate::models::Sport;
use crate::utils::extract::normalize_space;
use scraper::{Html, Selector};

static SOURCES: &[LeagueSource] = &[
    LeagueSource {
        sport: Sport::Football,
        league: "Лига чемпионов УЕФА",
        url: "https://www.fonbet.ru/football/18079/turnir-champions-league",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Лига Европы УЕФА",
        url: "https://www.fonbet.ru/football/18080/turnir-europa-league",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Англия. Премьер-лига",
        url: "https://www.fonbet.ru/football/18033/turnir-angliya-premer-liga",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Испания. Ла Лига",
        url: "https://www.fonbet.ru/football/18036/turnir-ispaniya-primera",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Италия. Серия A",
        url: "https://www.fonbet.ru/football/18035/turnir-italiya-seriya-a",
    },
    LeagueSource {
        sport: Sport::Football,
        league: "Германия. Бундеслига",
        url: "https://www.fonbet.ru/football/18034/turnir-germaniya-bundesliga",
    },
    LeagueSource {
        sport: Sport::Hockey,
        league: "КХЛ",
        url: "https://www.fonbet.ru/hockey/18219/turnir-khl",
    },
    LeagueSource {
        sport: Sport::Hockey,
        league: "НХЛ",
        url: "https://www.fonbet.ru/hockey/18220/turnir-nhl",
    },
    LeagueSource {
        sport: Sport::Basket,
        league: "NBA",
        url: "https://www.fonbet.ru/basketball/18269/turnir-nba",
    },
    LeagueSource {
        sport: Sport::Esports,
        league: "Dota 2",
        url: "https://www.fonbet.ru/esports/19006/discipline-dota-2",
    },
    LeagueSource {
        sport: Sport::Esports,
        league: "CS2",
        url: "https://www.fonbet.ru/esports/19001/discipline-counter-strike",
    },
];

/// Fonbet renders event cards as `div.live-event__content` (or, on some
/// page variants, any element with a `data-event-id` attribute); the id
/// lives in that attribute rather than in the row text.
pub struct FonbetScraper {
    client: reqwest::Client,
}

impl FonbetScraper {
    pub fn new() -> Self {
        Self {
            client: scraper_client(),
        }
    }
}

impl Default for FonbetScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for FonbetScraper {
    fn bookmaker(&self) -> &'static str {
        "fonbet"
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn sources(&self) -> &'static [LeagueSource] {
        SOURCES
    }

    fn candidate_blocks(&self, html: &str) -> Vec<CandidateBlock> {
        let document = Html::parse_document(html);
        let card_selector = Selector::parse("div.live-event__content").unwrap();
        let fallback_selector = Selector::parse("[data-event-id]").unwrap();
        let team_selector = Selector::parse(".live-event__team-name, .participant").unwrap();

        let to_block = |card: scraper::ElementRef<'_>| {
            let names: Vec<String> = card
                .select(&team_selector)
                .map(|n| normalize_space(&n.text().collect::<Vec<_>>().join(" ")))
                .filter(|n| !n.is_empty())
                .collect();
            let teams = match names.as_slice() {
                [t1, t2, ..] => Some((t1.clone(), t2.clone())),
                _ => None,
            };
            CandidateBlock {
                id: card.value().attr("data-event-id").map(str::to_string),
                teams,
                text: normalize_space(&card.text().collect::<Vec<_>>().join(" ")),
            }
        };

        let mut blocks: Vec<CandidateBlock> =
            document.select(&card_selector).map(to_block).collect();
        if blocks.is_empty() {
            blocks = document.select(&fallback_selector).map(to_block).collect();
        }

        blocks.retain(|b| !b.text.is_empty());
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="live-event__content" data-event-id="40151823">
            <div class="live-event__team-name">Зенит</div>
            <div class="live-event__team-name">Краснодар</div>
            <div class="live-event__start-time">18 фев 19:00</div>
            <span>2.35</span><span>3.25</span><span>3.10</span>
            <span>1.36</span><span>1.33</span><span>1.59</span>
        </div>
        </body></html>
    "#;

    const FALLBACK_PAGE: &str = r#"
        <html><body>
        <div data-event-id="40151999">
            Team Spirit — Natus Vincere 19 фев 16:00 1.72 2.10
        </div>
        </body></html>
    "#;

    #[test]
    fn id_comes_from_attribute() {
        let scraper = FonbetScraper::new();
        let blocks = scraper.candidate_blocks(PAGE);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id.as_deref(), Some("40151823"));
    }

    #[test]
    fn card_parses_into_record() {
        let scraper = FonbetScraper::new();
        let source = &SOURCES[0];
        let records = super::super::parse_page(&scraper, source, PAGE);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.id, "40151823");
        assert_eq!(rec.team1, "Зенит");
        assert_eq!(rec.team2, "Краснодар");
        assert_eq!(rec.time, "19:00");
        assert_eq!(rec.p1, "2.35");
        assert_eq!(rec.x, "3.25");
        assert_eq!(rec.p2, "3.10");
        assert_eq!(rec.source.as_deref(), Some("fonbet"));
    }

    #[test]
    fn fallback_selector_and_two_outcome_build() {
        let scraper = FonbetScraper::new();
        let esports = SOURCES.iter().find(|s| s.sport == Sport::Esports).unwrap();
        let records = super::super::parse_page(&scraper, esports, FALLBACK_PAGE);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.id, "40151999");
        assert_eq!(rec.team1, "Team Spirit");
        assert_eq!(rec.team2, "Natus Vincere");
        assert_eq!(rec.p1, "1.72");
        assert_eq!(rec.p2, "2.10");
        assert_eq!(rec.x, crate::models::ODDS_PLACEHOLDER);
    }
}
