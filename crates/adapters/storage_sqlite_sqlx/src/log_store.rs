//! `SQLite` implementation of [`LogStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homesim_app::ports::LogStore;
use homesim_domain::error::HomeError;
use homesim_domain::log_entry::{LogEntry, NewLogEntry};

use crate::error::StorageError;

struct Wrapper(LogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(LogEntry {
            id: row.try_get("id")?,
            device: row.try_get("device")?,
            status: row.try_get("status")?,
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            timestamp: row.try_get("timestamp")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO logs (device, status, temperature, humidity, timestamp)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = r"
    SELECT id, device, status, temperature, humidity, timestamp
    FROM logs ORDER BY id DESC LIMIT ?
";

/// `SQLite`-backed append-only log.
pub struct SqliteLogStore {
    pool: SqlitePool,
}

impl SqliteLogStore {
    /// Create a new log store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LogStore for SqliteLogStore {
    async fn insert(&self, entry: NewLogEntry) -> Result<LogEntry, HomeError> {
        let result = sqlx::query(INSERT)
            .bind(&entry.device)
            .bind(&entry.status)
            .bind(entry.temperature)
            .bind(entry.humidity)
            .bind(&entry.timestamp)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(entry.with_id(result.last_insert_rowid()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<LogEntry>, HomeError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("log store closed");
    }
}
