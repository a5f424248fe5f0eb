//! Schedule rules: fixed time-of-day device actions.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceId, PowerState};
use crate::time::TimeOfDay;

/// Force `device` into `action` when the wall clock reads `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    pub device: DeviceId,
    pub time: TimeOfDay,
    pub action: PowerState,
}

impl ScheduleRule {
    #[must_use]
    pub fn new(device: DeviceId, time: TimeOfDay, action: PowerState) -> Self {
        Self {
            device,
            time,
            action,
        }
    }

    /// Whether the rule fires at `now`.
    ///
    /// Only an exact minute match counts: a check that runs a minute late
    /// skips the rule until the next day.
    #[must_use]
    pub fn is_due(&self, now: TimeOfDay) -> bool {
        self.time == now
    }

    /// Light on at 08:00, fan off at 22:00.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(DeviceId::Light, TimeOfDay { hour: 8, minute: 0 }, PowerState::On),
            Self::new(DeviceId::Fan, TimeOfDay { hour: 22, minute: 0 }, PowerState::Off),
        ]
    }
}

impl std::fmt::Display for ScheduleRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} at {}", self.device, self.action, self.time)
    }
}
