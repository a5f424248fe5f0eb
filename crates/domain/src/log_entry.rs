//! Log entry: an immutable record of a device state change.
//!
//! Entries are append-only: the store assigns a strictly increasing `id` on
//! insertion and nothing ever updates or deletes them.

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;

/// What caused a device state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSource {
    /// Toggled through the presentation layer.
    Manual,
    /// Switched on by the motion automation.
    Auto,
    /// Applied by a schedule rule.
    Scheduled,
}

impl ChangeSource {
    /// The `device` column value for a change of `device` from this source,
    /// e.g. `Light`, `Light(Auto)`, `Fan(Scheduled)`.
    #[must_use]
    pub fn label(self, device: DeviceId) -> String {
        match self {
            Self::Manual => device.to_string(),
            Self::Auto => format!("{device}(Auto)"),
            Self::Scheduled => format!("{device}(Scheduled)"),
        }
    }
}

/// A log entry that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub device: String,
    pub status: String,
    pub temperature: f64,
    pub humidity: f64,
    /// Local time of the append, `DD-MM-YYYY HH:MM:SS`.
    pub timestamp: String,
}

impl NewLogEntry {
    /// Attach the identifier assigned by the store.
    #[must_use]
    pub fn with_id(self, id: i64) -> LogEntry {
        LogEntry {
            id,
            device: self.device,
            status: self.status,
            temperature: self.temperature,
            humidity: self.humidity,
            timestamp: self.timestamp,
        }
    }
}

/// A persisted log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub device: String,
    pub status: String,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
}
