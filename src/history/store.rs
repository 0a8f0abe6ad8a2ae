//! SQLite-backed calculation history.

use super::page::{HistoryPage, has_more};
use super::record::{HistoryRecord, Timestamps};
use crate::error::StorageError;
use crate::numeral::{DigitScript, to_neutral};
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS calc_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        expression TEXT NOT NULL,
        result TEXT NOT NULL,
        timestamp_english TEXT NOT NULL,
        timestamp_nepali TEXT NOT NULL,
        timestamp_limbu TEXT NOT NULL
    );
";

const SELECT_COLUMNS: &str =
    "SELECT id, expression, result, timestamp_english, timestamp_nepali, timestamp_limbu FROM calc_history";

/// Outcome of deleting a record by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Append-only log of calculations with newest-first paging.
///
/// Ids come from `AUTOINCREMENT`, so a deleted id is never handed out again.
pub struct HistoryStore {
    connection: Connection,
}

impl HistoryStore {
    /// Open (or create) the history file at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let connection = Connection::open(path)?;
        debug!(path = %path.display(), "opened history store");
        Self::with_connection(connection)
    }

    /// A history that lives only as long as the process.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self, StorageError> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    /// Make every later write fail.
    #[cfg(test)]
    pub(crate) fn drop_history_table(&self) {
        self.connection
            .execute_batch("DROP TABLE calc_history")
            .unwrap();
    }

    /// Record a calculation, stamped with the current local time.
    ///
    /// History is best-effort: a storage failure is logged and swallowed so
    /// the calculation itself is never affected.
    pub fn append(&self, expression: &str, result: &str, script: DigitScript) -> Option<i64> {
        match self.try_append(expression, result, script, Local::now().naive_local()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "Failed to save calculation");
                None
            }
        }
    }

    /// Record a calculation written in `script`, stamped with `at`.
    ///
    /// Digits are stored in neutral form; the timestamp is stored once per
    /// script.
    pub fn try_append(
        &self,
        expression: &str,
        result: &str,
        script: DigitScript,
        at: NaiveDateTime,
    ) -> Result<i64, StorageError> {
        let expression = to_neutral(expression, script);
        let result = to_neutral(result, script);
        let timestamps = Timestamps::render(at);

        self.connection.execute(
            "INSERT INTO calc_history
                (expression, result, timestamp_english, timestamp_nepali, timestamp_limbu)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expression,
                result,
                timestamps.english,
                timestamps.nepali,
                timestamps.limbu
            ],
        )?;

        let id = self.connection.last_insert_rowid();
        debug!(id, %expression, %result, "saved calculation");
        Ok(id)
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<usize, StorageError> {
        let total: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM calc_history", [], |row| row.get(0))?;
        Ok(total as usize)
    }

    /// Fetch up to `limit` records starting `offset` records from the newest.
    pub fn page(&self, offset: usize, limit: usize) -> Result<HistoryPage, StorageError> {
        let mut statement = self
            .connection
            .prepare_cached(&format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1 OFFSET ?2"))?;

        let limit_bind = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset_bind = i64::try_from(offset).unwrap_or(i64::MAX);
        let records = statement
            .query_map(params![limit_bind, offset_bind], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let total = self.count()?;

        Ok(HistoryPage {
            records,
            offset,
            total,
            has_more: has_more(total, offset, limit),
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<HistoryRecord>, StorageError> {
        let record = self
            .connection
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Remove one record. Deleting an id that is already gone reports
    /// `NotFound` rather than failing.
    pub fn delete(&self, id: i64) -> Result<DeleteOutcome, StorageError> {
        let removed = self
            .connection
            .execute("DELETE FROM calc_history WHERE id = ?1", params![id])?;

        if removed == 0 {
            debug!(id, "record already gone");
            Ok(DeleteOutcome::NotFound)
        } else {
            info!(id, "deleted calculation");
            Ok(DeleteOutcome::Deleted)
        }
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get(0)?,
        expression: row.get(1)?,
        result: row.get(2)?,
        timestamps: Timestamps {
            english: row.get(3)?,
            nepali: row.get(4)?,
            limbu: row.get(5)?,
        },
    })
}
