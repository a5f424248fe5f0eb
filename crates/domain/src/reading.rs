//! Environment readings produced by the simulated sensors.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Closed range simulated temperatures are drawn from, in °C.
pub const TEMPERATURE_RANGE_C: RangeInclusive<i32> = 20..=30;

/// Closed range simulated relative humidities are drawn from, in %.
pub const HUMIDITY_RANGE_PCT: RangeInclusive<i32> = 40..=70;

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub temperature_c: i32,
    pub humidity_pct: i32,
}

impl EnvironmentReading {
    /// Whether both values lie in the simulated ranges.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        TEMPERATURE_RANGE_C.contains(&self.temperature_c)
            && HUMIDITY_RANGE_PCT.contains(&self.humidity_pct)
    }
}
