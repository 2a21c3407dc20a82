use crate::models::Sport;

/// Ordered prefix table mapping league/tournament names to sports.
///
/// Order matters for overlapping prefixes: more specific entries come before
/// generic ones within a block. The table covers the competition names the
/// feeds actually emit, in Russian and English.
pub static SPORT_PREFIXES: &[(&str, Sport)] = &[
    // football
    ("Лига чемпионов УЕФА", Sport::Football),
    ("Лига Европы УЕФА", Sport::Football),
    ("Лига конференций УЕФА", Sport::Football),
    ("УЕФА", Sport::Football),
    ("UEFA", Sport::Football),
    ("Англия. Премьер-лига", Sport::Football),
    ("Англия. Чемпионшип", Sport::Football),
    ("Англия. Лига 1", Sport::Football),
    ("Англия. Лига 2", Sport::Football),
    ("Англия. Кубок Лиги", Sport::Football),
    ("Англия. Кубок", Sport::Football),
    ("Испания. Ла Лига", Sport::Football),
    ("Испания. Сегунда", Sport::Football),
    ("Испания. Кубок Короля", Sport::Football),
    ("Германия. Бундеслига", Sport::Football),
    ("Германия. 2. Бундеслига", Sport::Football),
    ("Германия. Кубок", Sport::Football),
    ("Италия. Серия A", Sport::Football),
    ("Италия. Серия B", Sport::Football),
    ("Итальянский. Кубок", Sport::Football),
    ("Франция. Лига 1", Sport::Football),
    ("Франция. Лига 2", Sport::Football),
    ("Россия. Премьер-лига", Sport::Football),
    ("Россия. ФНЛ", Sport::Football),
    ("Россия. Кубок", Sport::Football),
    ("Нидерланды. Эредивизие", Sport::Football),
    ("Португалия. Примейра Лига", Sport::Football),
    ("Турция. Суперлига", Sport::Football),
    ("Шотландия. Премьершип", Sport::Football),
    ("Бельгия. Про Лига", Sport::Football),
    ("Бразилия. Серия A", Sport::Football),
    ("Аргентина. Примера Дивисьон", Sport::Football),
    ("США. MLS", Sport::Football),
    ("MLS", Sport::Football),
    ("Мексика. Лига MX", Sport::Football),
    ("КОНМЕБОЛ. Копа Либертадорес", Sport::Football),
    ("КОНКАКАФ", Sport::Football),
    ("Саудовская Аравия. Про Лига", Sport::Football),
    ("Япония. Джей-Лига", Sport::Football),
    ("Южная Корея. К-Лига", Sport::Football),
    ("Австралия. A-League", Sport::Football),
    ("Африка. КАФ", Sport::Football),
    ("Азия. AFC", Sport::Football),
    ("Греция. Суперлига", Sport::Football),
    ("Украина. Премьер-лига", Sport::Football),
    ("Польша. Экстракласа", Sport::Football),
    ("Чехия. Первая лига", Sport::Football),
    ("Австрия. Бундеслига", Sport::Football),
    ("Швейцария. Суперлига", Sport::Football),
    ("Дания. Суперлига", Sport::Football),
    ("Норвегия. Элитесерия", Sport::Football),
    ("Швеция. Алльсвенскан", Sport::Football),
    // hockey
    ("КХЛ", Sport::Hockey),
    ("НХЛ", Sport::Hockey),
    ("NHL", Sport::Hockey),
    ("ВХЛ", Sport::Hockey),
    ("МХЛ", Sport::Hockey),
    ("AHL", Sport::Hockey),
    ("ECHL", Sport::Hockey),
    ("Швеция. SHL", Sport::Hockey),
    ("Финляндия. Liiga", Sport::Hockey),
    ("Чехия. Extraliga", Sport::Hockey),
    ("Германия. DEL", Sport::Hockey),
    ("Швейцария. National League", Sport::Hockey),
    ("Беларусь. Экстралига", Sport::Hockey),
    ("Казахстан. ЧРК", Sport::Hockey),
    ("Австрия. ICEHL", Sport::Hockey),
    ("Словакия. Extraliga", Sport::Hockey),
    // basketball
    ("NBA", Sport::Basket),
    ("НБА", Sport::Basket),
    ("Евролига", Sport::Basket),
    ("EuroLeague", Sport::Basket),
    ("EuroCup", Sport::Basket),
    ("Единая лига ВТБ", Sport::Basket),
    ("Испания. ACB", Sport::Basket),
    ("Турция. BSL", Sport::Basket),
    ("Италия. LBA", Sport::Basket),
    ("Франция. Про A", Sport::Basket),
    ("Германия. BBL", Sport::Basket),
    ("Греция. HEBA A1", Sport::Basket),
    ("Израиль. Winner League", Sport::Basket),
    ("Австралия. NBL", Sport::Basket),
    ("Китай. CBA", Sport::Basket),
    ("ФИБА", Sport::Basket),
    ("FIBA", Sport::Basket),
    // esports
    ("CS2", Sport::Esports),
    ("Counter-Strike", Sport::Esports),
    ("Dota 2", Sport::Esports),
    ("Valorant", Sport::Esports),
    ("League of Legends", Sport::Esports),
    ("LoL", Sport::Esports),
    ("Rocket League", Sport::Esports),
    ("RLCS", Sport::Esports),
    ("Overwatch", Sport::Esports),
    ("PUBG", Sport::Esports),
    ("Apex Legends", Sport::Esports),
    ("Rainbow Six", Sport::Esports),
    ("Hearthstone", Sport::Esports),
    ("StarCraft", Sport::Esports),
    // tennis
    ("ATP", Sport::Tennis),
    ("WTA", Sport::Tennis),
    ("ITF", Sport::Tennis),
    ("Теннис", Sport::Tennis),
    // volleyball
    ("CEV", Sport::Volleyball),
    ("ВНЛ", Sport::Volleyball),
    ("VNL", Sport::Volleyball),
    ("Россия. Суперлига", Sport::Volleyball),
    ("Польша. PlusLiga", Sport::Volleyball),
    ("Италия. SuperLega", Sport::Volleyball),
    ("Волейбол", Sport::Volleyball),
    // mma
    ("UFC", Sport::Mma),
    ("Bellator", Sport::Mma),
    ("ONE Championship", Sport::Mma),
    ("ONE FC", Sport::Mma),
    ("ACB MMA", Sport::Mma),
    ("PFL", Sport::Mma),
    ("M-1", Sport::Mma),
    ("Absolute Championship", Sport::Mma),
];

/// Keyword fallback, checked in order when no prefix matched. Football first:
/// it is the dominant sport in the feeds and several of its keywords ("лига",
/// "суперлига") would otherwise be claimed by later sets.
static SPORT_KEYWORDS: &[(Sport, &[&str])] = &[
    (
        Sport::Football,
        &[
            "футбол", "лига", "премьер", "кубок", "уефа", "серия", "бундес", "ла лига", "копа",
            "mls",
        ],
    ),
    (
        Sport::Hockey,
        &["хоккей", "кхл", "нхл", "hockey", "nhl", "ahl", "shl", "liiga", "del"],
    ),
    (
        Sport::Basket,
        &["баскет", "nba", "евролига", "basketball", "vtb", "acb", "bbl"],
    ),
    (
        Sport::Esports,
        &["dota", "cs2", "counter-strike", "valorant", "esports", "rlcs", "pubg", "apex"],
    ),
    (
        Sport::Tennis,
        &["теннис", "atp", "wta", "itf", "уимблдон", "ролан гаррос", "открытый чемпионат"],
    ),
    (
        Sport::Volleyball,
        &["волейбол", "volleyball", "суперлига", "cev", "vnl", "plusliga", "superlega"],
    ),
    (
        Sport::Mma,
        &["ufc", "bellator", "mma", "one championship", "pfl", "acb"],
    ),
];

/// Classify a league name against a caller-supplied prefix table.
///
/// First matching prefix wins, then case-insensitive keyword search, then the
/// `football` default. Total: always returns a value.
pub fn classify_with(table: &[(&str, Sport)], league: &str) -> Sport {
    for (prefix, sport) in table {
        if league.starts_with(prefix) {
            return *sport;
        }
    }

    let lower = league.to_lowercase();
    for (sport, keywords) in SPORT_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *sport;
        }
    }

    // Deliberate fallback: football dominates the source data, and an
    // unclassified league is far more likely football than anything else.
    Sport::Football
}

/// Classify against the built-in prefix table.
pub fn classify(league: &str) -> Sport {
    classify_with(SPORT_PREFIXES, league)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches() {
        assert_eq!(classify("КХЛ"), Sport::Hockey);
        assert_eq!(classify("NBA"), Sport::Basket);
        assert_eq!(classify("Англия. Премьер-лига"), Sport::Football);
        assert_eq!(classify("Dota 2. BLAST Slam"), Sport::Esports);
        assert_eq!(classify("ATP. Australian Open"), Sport::Tennis);
        assert_eq!(classify("UFC Fight Night"), Sport::Mma);
    }

    #[test]
    fn overlapping_prefixes_use_table_order() {
        // "Россия. Суперлига" is volleyball in the table even though
        // "суперлига" is also a football keyword.
        assert_eq!(classify("Россия. Суперлига"), Sport::Volleyball);
        assert_eq!(classify("Турция. Суперлига"), Sport::Football);
    }

    #[test]
    fn keyword_fallback() {
        assert_eq!(classify("Чемпионат мира. Хоккей"), Sport::Hockey);
        assert_eq!(classify("College Basketball"), Sport::Basket);
        assert_eq!(classify("Мужской волейбол"), Sport::Volleyball);
    }

    #[test]
    fn unrecognized_defaults_to_football() {
        assert_eq!(classify("Случайное Название Лиги"), Sport::Football);
        assert_eq!(classify(""), Sport::Football);
    }

    #[test]
    fn injected_table_wins() {
        let table: &[(&str, Sport)] = &[("Случайное", Sport::Other)];
        assert_eq!(classify_with(table, "Случайное Название"), Sport::Other);
    }
}
