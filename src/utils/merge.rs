use crate::models::{MatchRecord, Sport};
use std::collections::HashMap;

/// Map a month abbreviation to a zero-padded ordinal for sorting.
fn month_ordinal(token: &str) -> Option<&'static str> {
    let t = token.to_lowercase();
    let n = match t.as_str() {
        "янв" | "jan" => "01",
        "фев" | "feb" => "02",
        "мар" | "mar" => "03",
        "апр" | "apr" => "04",
        "май" | "мая" | "may" => "05",
        "июн" | "jun" => "06",
        "июл" | "jul" => "07",
        "авг" | "aug" => "08",
        "сен" | "sep" => "09",
        "окт" | "oct" => "10",
        "ноя" | "nov" => "11",
        "дек" | "dec" => "12",
        _ => return None,
    };
    Some(n)
}

/// Sortable key for a display date+time: `"MM-DD HH:MM"`.
///
/// The display form ("17 фев") is not directly sortable, so the month token
/// goes through the ordinal table and the day is zero-padded. Records with
/// an unparseable date sort last.
pub fn sort_key(record: &MatchRecord) -> String {
    let parts: Vec<&str> = record.date.split_whitespace().collect();
    if let [day, month] = parts[..] {
        if let Some(m) = month_ordinal(month) {
            return format!("{}-{:0>2} {}", m, day, record.time);
        }
    }
    format!("99-99 {}", record.time)
}

/// Combine record lists into one deduplicated, chronologically sorted list.
///
/// Lists are iterated in the order given, ascending priority: on a
/// `(sport, id)` collision the record from the later list replaces the
/// earlier one wholesale, with no field-level reconciliation.
pub fn merge(lists: Vec<Vec<MatchRecord>>) -> Vec<MatchRecord> {
    let mut by_key: HashMap<(Sport, String), usize> = HashMap::new();
    let mut merged: Vec<MatchRecord> = Vec::new();

    for record in lists.into_iter().flatten() {
        let key = (record.sport, record.id.clone());
        match by_key.get(&key) {
            Some(&idx) => merged[idx] = record,
            None => {
                by_key.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    merged.sort_by_key(sort_key);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ODDS_PLACEHOLDER;

    fn record(sport: Sport, id: &str, date: &str, time: &str, source: &str) -> MatchRecord {
        MatchRecord {
            sport,
            league: "Лига".to_string(),
            id: id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            team1: "Команда Один".to_string(),
            team2: "Команда Два".to_string(),
            p1: "2.10".to_string(),
            x: "3.40".to_string(),
            p2: "3.50".to_string(),
            p1x: ODDS_PLACEHOLDER.to_string(),
            p12: ODDS_PLACEHOLDER.to_string(),
            px2: ODDS_PLACEHOLDER.to_string(),
            match_url: None,
            source: Some(source.to_string()),
        }
    }

    #[test]
    fn later_list_wins_on_collision() {
        let low = vec![record(Sport::Football, "100", "17 фев", "20:45", "fonbet")];
        let high = vec![record(Sport::Football, "100", "17 фев", "20:45", "sheets")];
        let merged = merge(vec![low, high]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source.as_deref(), Some("sheets"));
    }

    #[test]
    fn same_id_different_sport_is_not_a_collision() {
        let merged = merge(vec![vec![
            record(Sport::Football, "100", "17 фев", "20:45", "a"),
            record(Sport::Hockey, "100", "17 фев", "19:00", "a"),
        ]]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let input = vec![
            record(Sport::Football, "1", "18 фев", "20:00", "a"),
            record(Sport::Hockey, "2", "17 фев", "19:30", "a"),
            record(Sport::Basket, "3", "", "", "a"),
        ];
        let once = merge(vec![input.clone()]);
        let twice = merge(vec![once.clone()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn chronological_order() {
        let merged = merge(vec![vec![
            record(Sport::Football, "1", "1 мар", "10:00", "a"),
            record(Sport::Football, "2", "17 фев", "20:45", "a"),
            record(Sport::Football, "3", "17 фев", "12:00", "a"),
            record(Sport::Football, "4", "", "", "a"),
        ]]);
        let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn day_is_zero_padded_in_sort_key() {
        let early = record(Sport::Football, "1", "2 фев", "10:00", "a");
        let late = record(Sport::Football, "2", "17 фев", "10:00", "a");
        assert!(sort_key(&early) < sort_key(&late));
    }
}
