//! Event log: timestamps log entries and fills in missing readings.

use std::sync::Arc;

use homesim_domain::error::HomeError;
use homesim_domain::log_entry::{LogEntry, NewLogEntry};
use homesim_domain::reading::{HUMIDITY_RANGE_PCT, TEMPERATURE_RANGE_C};
use homesim_domain::time::format_log_timestamp;

use crate::ports::{Clock, LogStore, RandomSource};

/// Application service in front of a [`LogStore`].
///
/// When a caller does not supply a temperature or humidity, the log draws
/// its own value from the sampler ranges using its **own** random source.
/// Those values are unrelated to whatever the status refresh last displayed.
pub struct EventLog<S> {
    store: S,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl<S: LogStore> EventLog<S> {
    /// Create a new log writing to `store`.
    pub fn new(store: S, random: Arc<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            random,
            clock,
        }
    }

    /// Append one entry, stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] when the store rejects the write.
    #[tracing::instrument(skip(self))]
    pub async fn append(
        &self,
        device: &str,
        status: &str,
        temperature: Option<f64>,
        humidity: Option<f64>,
    ) -> Result<LogEntry, HomeError> {
        let temperature =
            temperature.unwrap_or_else(|| f64::from(self.random.next_in(TEMPERATURE_RANGE_C)));
        let humidity =
            humidity.unwrap_or_else(|| f64::from(self.random.next_in(HUMIDITY_RANGE_PCT)));

        let entry = self
            .store
            .insert(NewLogEntry {
                device: device.to_string(),
                status: status.to_string(),
                temperature,
                humidity,
                timestamp: format_log_timestamp(self.clock.now()),
            })
            .await?;

        tracing::debug!(id = entry.id, "log entry appended");
        Ok(entry)
    }

    /// The `limit` most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] when the store cannot be read.
    pub async fn query(&self, limit: usize) -> Result<Vec<LogEntry>, HomeError> {
        self.store.recent(limit).await
    }

    /// Close the underlying store.
    pub async fn close(&self) {
        self.store.close().await;
    }
}
