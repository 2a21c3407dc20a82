use std::path::PathBuf;

const DEFAULT_SHEET_ID: &str = "1QkVj51WMKSd6-LU4vZK3dYPk6QLQIO014ydpACtThNk";

/// Runtime configuration, read from environment variables. Every knob has a
/// default so the binary runs with no setup beyond an optional `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Sheets document id for the curated odds sheet.
    pub sheet_id: String,
    /// Worksheet tab id within the document.
    pub sheet_gid: String,
    /// Hours between runs in watch mode.
    pub update_interval_hours: u64,
    /// Re-run forever instead of a one-shot batch.
    pub watch: bool,
    /// Also write the sheet-rows CSV mirror for the external uploader.
    pub write_sheets: bool,
    /// Service-account credentials path, passed through to the uploader.
    pub creds_file: String,
    /// Directory the JSON sinks are written into.
    pub output_dir: PathBuf,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            sheet_id: env_or("SHEET_ID", DEFAULT_SHEET_ID),
            sheet_gid: env_or("SHEET_GID", "0"),
            update_interval_hours: env_or("UPDATE_INTERVAL_HOURS", "2")
                .parse()
                .unwrap_or(2),
            watch: env_or("WATCH", "0") == "1",
            write_sheets: env_or("WRITE_SHEETS", "1") != "0",
            creds_file: env_or("CREDS_FILE", "credentials.json"),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", ".")),
        }
    }

    pub fn matches_path(&self) -> PathBuf {
        self.output_dir.join("matches.json")
    }

    pub fn bookmaker_path(&self, bookmaker: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", bookmaker))
    }

    pub fn sheet_rows_path(&self) -> PathBuf {
        self.output_dir.join("sheet_rows.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        // Not every variable is guaranteed unset in the test environment,
        // so only the derived paths are asserted unconditionally.
        let config = Config::from_env();
        assert!(config.matches_path().ends_with("matches.json"));
        assert!(config.bookmaker_path("marathon").ends_with("marathon.json"));
        assert!(config.sheet_rows_path().ends_with("sheet_rows.csv"));
    }
}
