//! Log store port: durable, append-only persistence for log entries.

use std::future::Future;

use homesim_domain::error::HomeError;
use homesim_domain::log_entry::{LogEntry, NewLogEntry};

/// Append-only repository for [`LogEntry`]s.
///
/// Implementations assign a strictly increasing `id` on insert and never
/// update or delete rows.
pub trait LogStore {
    /// Persist a new entry and return it with its assigned id.
    fn insert(
        &self,
        entry: NewLogEntry,
    ) -> impl Future<Output = Result<LogEntry, HomeError>> + Send;

    /// Get the most recent entries, ordered by descending id.
    fn recent(&self, limit: usize)
    -> impl Future<Output = Result<Vec<LogEntry>, HomeError>> + Send;

    /// Release the underlying connection. Called once at shutdown.
    fn close(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

impl<T: LogStore + Send + Sync> LogStore for std::sync::Arc<T> {
    fn insert(
        &self,
        entry: NewLogEntry,
    ) -> impl Future<Output = Result<LogEntry, HomeError>> + Send {
        (**self).insert(entry)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LogEntry>, HomeError>> + Send {
        (**self).recent(limit)
    }

    fn close(&self) -> impl Future<Output = ()> + Send {
        (**self).close()
    }
}
