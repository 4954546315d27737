//! Append-only history of promotional-item observations, backed by SQLite.

use crate::error::WatchResult;
use crate::extract::Promo;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded observation, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub name: String,
    pub url: String,
    pub is_happy_hour: bool,
    pub observed_at: DateTime<Utc>,
}

/// Append-only observation log backed by SQLite.
///
/// Rows are only ever inserted, never updated or deleted. The run
/// orchestrator is the sole writer; novelty detection only reads.
pub struct HistoryStore {
    db: Connection,
}

impl HistoryStore {
    /// Open or create the history database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db = Connection::open(path)
            .with_context(|| format!("failed to open history db: {}", path.display()))?;

        db.execute_batch(
            "CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                is_happy_hour INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );",
        )
        .context("failed to create history table")?;

        Ok(Self { db })
    }

    /// Append every item as a new observation, all-or-nothing.
    ///
    /// The whole batch is one transaction and shares one timestamp; if the
    /// insert fails partway nothing is committed.
    pub fn append_all(&mut self, items: &[Promo]) -> WatchResult<()> {
        // Fixed-width timestamps so lexicographic TEXT order matches time order.
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let tx = self.db.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO history (name, url, is_happy_hour, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for item in items {
                stmt.execute(rusqlite::params![
                    item.name,
                    item.url,
                    item.is_happy_hour,
                    now
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    /// Latest prior observation exactly matching (name, url), if any.
    ///
    /// Timestamp ties are broken by rowid, so repeated calls always see the
    /// same winner.
    pub fn most_recent(&self, name: &str, url: &str) -> WatchResult<Option<Observation>> {
        let mut stmt = self.db.prepare(
            "SELECT name, url, is_happy_hour, created_at FROM history
             WHERE name = ?1 AND url = ?2
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )?;

        let result = stmt.query_row(rusqlite::params![name, url], |row| {
            let created: String = row.get(3)?;
            let observed_at = DateTime::parse_from_rfc3339(&created)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;

            Ok(Observation {
                name: row.get(0)?,
                url: row.get(1)?,
                is_happy_hour: row.get(2)?,
                observed_at,
            })
        });

        match result {
            Ok(obs) => Ok(Some(obs)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(name: &str, url: &str, hh: bool) -> Promo {
        Promo {
            name: name.to_string(),
            url: url.to_string(),
            is_happy_hour: hh,
        }
    }

    fn open_temp() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(&dir.path().join("history.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_most_recent_on_empty_store() {
        let (_dir, store) = open_temp();
        assert!(store.most_recent("Bundle X", "https://x").unwrap().is_none());
    }

    #[test]
    fn test_append_and_read_back() {
        let (_dir, mut store) = open_temp();
        store
            .append_all(&[promo("Bundle X", "https://x", true)])
            .unwrap();

        let obs = store.most_recent("Bundle X", "https://x").unwrap().unwrap();
        assert_eq!(obs.name, "Bundle X");
        assert_eq!(obs.url, "https://x");
        assert!(obs.is_happy_hour);
    }

    #[test]
    fn test_match_is_exact_on_name_and_url() {
        let (_dir, mut store) = open_temp();
        store
            .append_all(&[promo("Bundle X", "https://x", true)])
            .unwrap();

        assert!(store.most_recent("Bundle X", "https://y").unwrap().is_none());
        assert!(store.most_recent("Bundle Y", "https://x").unwrap().is_none());
    }

    #[test]
    fn test_most_recent_returns_latest_run() {
        let (_dir, mut store) = open_temp();
        store
            .append_all(&[promo("Bundle X", "https://x", false)])
            .unwrap();
        store
            .append_all(&[promo("Bundle X", "https://x", true)])
            .unwrap();

        let obs = store.most_recent("Bundle X", "https://x").unwrap().unwrap();
        assert!(obs.is_happy_hour, "second run must shadow the first");
    }

    #[test]
    fn test_timestamp_ties_break_by_rowid() {
        let (_dir, mut store) = open_temp();
        // One batch shares one timestamp: the later row wins on rowid.
        store
            .append_all(&[
                promo("Bundle X", "https://x", false),
                promo("Bundle X", "https://x", true),
            ])
            .unwrap();

        for _ in 0..3 {
            let obs = store.most_recent("Bundle X", "https://x").unwrap().unwrap();
            assert!(obs.is_happy_hour, "tie must resolve to the later row, every call");
        }
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");

        {
            let mut store = HistoryStore::open(&path).unwrap();
            store
                .append_all(&[promo("Bundle X", "https://x", true)])
                .unwrap();
        }

        let store = HistoryStore::open(&path).unwrap();
        let obs = store.most_recent("Bundle X", "https://x").unwrap().unwrap();
        assert!(obs.is_happy_hour);
    }

    #[test]
    fn test_append_empty_batch_is_a_noop() {
        let (_dir, mut store) = open_temp();
        store.append_all(&[]).unwrap();
        assert!(store.most_recent("anything", "https://a").unwrap().is_none());
    }
}
