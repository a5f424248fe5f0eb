//! Deterministic port implementations for tests.
//!
//! Compiled for this crate's own tests and, behind the `test-util` feature,
//! for adapter crates that need a [`Home`](crate::home::Home) without IO.

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use std::collections::VecDeque;
use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use homesim_domain::alert::Alert;
use homesim_domain::error::HomeError;
use homesim_domain::log_entry::{LogEntry, NewLogEntry};
use homesim_domain::time::WallClock;

use crate::ports::{AlertPublisher, Clock, Feedback, LogStore, RandomSource};

/// Vec-backed log store. Can be switched into a failing mode.
#[derive(Default)]
pub struct InMemoryLogStore {
    entries: Mutex<Vec<LogEntry>>,
    failing: AtomicBool,
    closed: AtomicBool,
}

impl InMemoryLogStore {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl LogStore for InMemoryLogStore {
    fn insert(
        &self,
        entry: NewLogEntry,
    ) -> impl Future<Output = Result<LogEntry, HomeError>> + Send {
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(HomeError::Storage(Box::new(std::io::Error::other(
                "disk full",
            ))))
        } else {
            let mut entries = self.entries.lock().unwrap();
            let id = entries.last().map_or(1, |e| e.id + 1);
            let entry = entry.with_id(id);
            entries.push(entry.clone());
            Ok(entry)
        };
        async { result }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LogEntry>, HomeError>> + Send {
        let entries = self.entries.lock().unwrap();
        let result: Vec<LogEntry> = entries.iter().rev().take(limit).cloned().collect();
        async { Ok(result) }
    }

    fn close(&self) -> impl Future<Output = ()> + Send {
        self.closed.store(true, Ordering::SeqCst);
        async {}
    }
}

/// Replays scripted draws, then falls back to the low end of the range.
#[derive(Default)]
pub struct ScriptedRandom {
    draws: Mutex<VecDeque<i32>>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }

    pub fn push(&self, draws: impl IntoIterator<Item = i32>) {
        self.draws.lock().unwrap().extend(draws);
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in(&self, range: RangeInclusive<i32>) -> i32 {
        self.draws
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(*range.start())
    }
}

/// A clock stuck at a settable instant.
pub struct FixedClock {
    now: Mutex<WallClock>,
}

impl FixedClock {
    pub fn at(h: u32, m: u32, s: u32) -> Self {
        Self {
            now: Mutex::new(wall_clock(h, m, s)),
        }
    }

    pub fn set(&self, h: u32, m: u32, s: u32) {
        *self.now.lock().unwrap() = wall_clock(h, m, s);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> WallClock {
        *self.now.lock().unwrap()
    }
}

pub fn wall_clock(h: u32, m: u32, s: u32) -> WallClock {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[derive(Default)]
pub struct CountingFeedback {
    clicks: AtomicUsize,
}

impl CountingFeedback {
    pub fn clicks(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }
}

impl Feedback for CountingFeedback {
    fn click(&self) {
        self.clicks.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertPublisher for RecordingAlerts {
    fn publish(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }
}
