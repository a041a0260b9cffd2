use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{AnalyticsError, Result};
use crate::models::Trade;
use crate::source::TradeSource;

/// Reads a journal export: a JSON array of trade records.
///
/// A file that is not a JSON array is an error. Individual records that do
/// not match the trade shape are skipped with a warning, so one bad row does
/// not hide the rest of the journal.
pub struct JsonFileSource {
    path: PathBuf,
    skipped: usize,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skipped: 0,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Records dropped by the last load.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl TradeSource for JsonFileSource {
    async fn load_trades(&mut self) -> Result<Vec<Trade>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| AnalyticsError::Io {
                path: self.display_path(),
                source,
            })?;

        let rows: Vec<Value> =
            serde_json::from_str(&content).map_err(|source| AnalyticsError::Parse {
                path: self.display_path(),
                source,
            })?;

        let total = rows.len();
        let mut trades = Vec::with_capacity(total);
        self.skipped = 0;
        for (i, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<Trade>(row) {
                Ok(trade) => trades.push(trade),
                Err(e) => {
                    warn!("Skipping malformed trade at index {} in {}: {}", i, self.display_path(), e);
                    self.skipped += 1;
                }
            }
        }

        if self.skipped > 0 {
            debug!("{} of {} record(s) skipped", self.skipped, total);
        }
        info!("Loaded {} trade(s) from {}", trades.len(), self.display_path());
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Outcome};

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "wolf-journal-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_journal_export() {
        let path = temp_file(
            "export",
            r#"[
                {"id": "a", "direction": "Long", "entryPrice": 100, "exitPrice": 110,
                 "entryDate": "2024-11-01", "entryTime": "09:30", "exitDate": "2024-11-01",
                 "exitTime": "10:15:00", "outcome": "win", "pnl": 10, "tags": "FVG, OB",
                 "tfAnalise": "H4", "tfEntrada": "M5"},
                {"id": "b", "direction": "short", "entryPrice": 50, "entryDate": "2024-11-02",
                 "entryTime": "", "exitDate": ""}
            ]"#,
        );
        let mut source = JsonFileSource::new(&path);
        let trades = source.load_trades().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(trades.len(), 2);
        assert_eq!(source.skipped(), 0);
        assert_eq!(trades[0].direction, Direction::Long);
        assert_eq!(trades[0].hold_minutes(), Some(45.0));
        assert_eq!(trades[0].tf_analise.as_deref(), Some("H4"));
        assert_eq!(trades[1].direction, Direction::Short);
        assert_eq!(trades[1].entry_time, None);
        assert_eq!(trades[1].exit_date, None);
        assert_eq!(trades[1].effective_outcome(), Outcome::Pending);
    }

    #[tokio::test]
    async fn skips_malformed_rows() {
        let path = temp_file(
            "malformed",
            r#"[
                {"id": "ok", "direction": "Long", "entryPrice": 1, "entryDate": "2024-11-01"},
                {"id": "bad", "direction": "Sideways", "entryPrice": 1, "entryDate": "2024-11-01"},
                {"id": "no-date", "direction": "Long", "entryPrice": 1}
            ]"#,
        );
        let mut source = JsonFileSource::new(&path);
        let trades = source.load_trades().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "ok");
        assert_eq!(source.skipped(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let mut source = JsonFileSource::new("/nonexistent/wolf-journal/trades.json");
        assert!(matches!(
            source.load_trades().await,
            Err(AnalyticsError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn non_array_is_a_parse_error() {
        let path = temp_file("object", r#"{"trades": []}"#);
        let mut source = JsonFileSource::new(&path);
        let result = source.load_trades().await;
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AnalyticsError::Parse { .. })));
    }
}
