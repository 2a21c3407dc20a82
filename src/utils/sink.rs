use crate::models::{MatchCollection, MatchRecord};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Serialize a collection to pretty JSON and atomically replace `path`.
///
/// The document is written to `<path>.tmp` in the same directory and then
/// renamed onto the destination, so a concurrent reader only ever observes a
/// complete old or new file. Where rename-over-existing is not supported the
/// destination is deleted first, accepting a brief window with no file.
/// Non-ASCII text is preserved literally (serde_json does not escape it).
pub fn write_collection(collection: &MatchCollection, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)
        .context("Failed to serialize match collection")?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json.as_bytes())
        .with_context(|| format!("Failed to write {}", tmp.display()))?;

    if fs::rename(&tmp, path).is_err() {
        fs::remove_file(path).ok();
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
    }

    Ok(())
}

/// Read a collection back from a JSON sink.
pub fn read_collection(path: &Path) -> Result<MatchCollection> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let collection =
        serde_json::from_str(&json).with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(collection)
}

/// Write the spreadsheet mirror: one CSV in the sheet's own column layout,
/// consumed by the external uploader. Same tmp-then-rename discipline as the
/// JSON sinks.
pub fn write_sheet_rows(records: &[MatchRecord], path: &Path) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp)
            .with_context(|| format!("Failed to create {}", tmp.display()))?;
        writer.write_record([
            "sport", "league", "id", "date", "time", "team1", "team2", "1", "X", "2", "1X", "12",
            "X2",
        ])?;
        for m in records {
            writer.write_record([
                m.sport.as_str(),
                &m.league,
                &m.id,
                &m.date,
                &m.time,
                &m.team1,
                &m.team2,
                &m.p1,
                &m.x,
                &m.p2,
                &m.p1x,
                &m.p12,
                &m.px2,
            ])?;
        }
        writer.flush()?;
    }

    if fs::rename(&tmp, path).is_err() {
        fs::remove_file(path).ok();
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchRecord, Sport, ODDS_PLACEHOLDER};
    use std::path::PathBuf;

    fn sample_record() -> MatchRecord {
        MatchRecord {
            sport: Sport::Football,
            league: "Россия. Премьер-лига".to_string(),
            id: "СПА_ДИН_172045".to_string(),
            date: "17 фев".to_string(),
            time: "20:45".to_string(),
            team1: "Спартак".to_string(),
            team2: "Динамо".to_string(),
            p1: "2.10".to_string(),
            x: "3.40".to_string(),
            p2: "3.50".to_string(),
            p1x: "1.30".to_string(),
            p12: "1.25".to_string(),
            px2: ODDS_PLACEHOLDER.to_string(),
            match_url: None,
            source: Some("sheets".to_string()),
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("matchfeed_sink_{}_{}", std::process::id(), name));
        dir
    }

    #[test]
    fn round_trip_preserves_matches() {
        let path = temp_file("roundtrip.json");
        let collection = MatchCollection::new("sheets", vec![sample_record()]);

        write_collection(&collection, &path).unwrap();
        let back = read_collection(&path).unwrap();

        assert_eq!(back.total, back.matches.len());
        assert_eq!(back.matches, collection.matches);
        assert_eq!(back.source, "sheets");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn cyrillic_is_not_escaped() {
        let path = temp_file("utf8.json");
        let collection = MatchCollection::new("sheets", vec![sample_record()]);

        write_collection(&collection, &path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Спартак"));
        assert!(!raw.contains("\\u"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn overwrite_replaces_whole_file_and_leaves_no_tmp() {
        let path = temp_file("overwrite.json");
        let v1 = MatchCollection::new("a", vec![sample_record()]);
        let v2 = MatchCollection::new("b", vec![]);

        write_collection(&v1, &path).unwrap();
        write_collection(&v2, &path).unwrap();

        let back = read_collection(&path).unwrap();
        assert_eq!(back.source, "b");
        assert_eq!(back.total, 0);
        assert!(!tmp_path(&path).exists());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn sheet_rows_mirror_layout() {
        let path = temp_file("rows.csv");
        write_sheet_rows(&[sample_record()], &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sport,league,id,date,time,team1,team2,1,X,2,1X,12,X2"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("football,"));
        assert!(row.contains("Спартак"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn destination_is_intact_until_rename() {
        // A crash between tmp-write and rename must leave the old file whole.
        let path = temp_file("atomic.json");
        let v1 = MatchCollection::new("old", vec![sample_record()]);
        write_collection(&v1, &path).unwrap();

        // Simulate the interrupted write: tmp exists, rename never happened.
        fs::write(tmp_path(&path), b"{\"truncated").unwrap();

        let back = read_collection(&path).unwrap();
        assert_eq!(back.source, "old");
        assert_eq!(back.total, 1);

        fs::remove_file(tmp_path(&path)).unwrap();
        fs::remove_file(&path).unwrap();
    }
}
