//! Scheduler: named recurring tasks with explicit periods.
//!
//! Each task runs on its own tokio task and ticks on a fixed period, the
//! first tick firing immediately. A failing cycle is logged and dropped; the
//! next one runs on schedule. Ticks missed because a cycle overran (or the
//! host slept) are skipped rather than replayed.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use homesim_domain::error::HomeError;

/// A unit of work the [`Scheduler`] repeats.
///
/// `run_once` can be called directly (e.g. from tests) without any timer.
pub trait PeriodicTask: Send + Sync + 'static {
    /// Stable name used to cancel the task and tag its logs.
    fn name(&self) -> &'static str;

    /// Execute one cycle.
    fn run_once(&self) -> impl Future<Output = Result<(), HomeError>> + Send;
}

/// Owns the running periodic tasks, keyed by name.
///
/// Dropping the scheduler cancels every task.
#[derive(Default)]
pub struct Scheduler {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `task`, repeating every `period`.
    ///
    /// A task already running under the same name is cancelled first.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero, or when called outside a tokio runtime.
    pub fn spawn<T: PeriodicTask>(&mut self, task: T, period: Duration) {
        let name = task.name();
        let handle = tokio::spawn(run_periodic(task, period));
        if let Some(previous) = self.tasks.insert(name, handle) {
            previous.abort();
        }
        tracing::info!(task = name, ?period, "periodic task started");
    }

    /// Stop the task called `name`. Returns `false` if no such task exists.
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.remove(name) {
            Some(handle) => {
                handle.abort();
                tracing::info!(task = name, "periodic task cancelled");
                true
            }
            None => false,
        }
    }

    /// Names of the registered tasks, sorted.
    #[must_use]
    pub fn task_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tasks.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Cancel every task and wait until each one has stopped.
    ///
    /// A cycle in flight is dropped at its next `.await`; once this returns
    /// no task touches the home again, so the log store can be closed.
    pub async fn shutdown(&mut self) {
        let tasks: Vec<_> = self.tasks.drain().collect();
        for (_, handle) in &tasks {
            handle.abort();
        }
        for (name, handle) in tasks {
            match handle.await {
                Err(err) if err.is_panic() => {
                    tracing::warn!(task = name, %err, "periodic task panicked");
                }
                _ => tracing::debug!(task = name, "periodic task stopped"),
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
    }
}

async fn run_periodic<T: PeriodicTask>(task: T, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if let Err(err) = task.run_once().await {
            tracing::warn!(task = task.name(), %err, "periodic task failed, cycle dropped");
        }
    }
}
