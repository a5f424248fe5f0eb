//! Alerts: threshold notifications raised by the status refresh.

use serde::{Deserialize, Serialize};

use crate::reading::EnvironmentReading;

/// A fire-and-forget notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    HighTemperature { value: i32 },
    LowHumidity { value: i32 },
    MotionDetected,
}

impl Alert {
    /// Stable snake_case name of the variant, matching the serialized `kind`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HighTemperature { .. } => "high_temperature",
            Self::LowHumidity { .. } => "low_humidity",
            Self::MotionDetected => "motion_detected",
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighTemperature { value } => write!(f, "Temperature high: {value}\u{b0}C"),
            Self::LowHumidity { value } => write!(f, "Humidity low: {value}%"),
            Self::MotionDetected => f.write_str("Motion detected!"),
        }
    }
}

/// Limits that turn a reading into alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Alert when the temperature is strictly above this value (°C).
    pub high_temperature: i32,
    /// Alert when the humidity is strictly below this value (%).
    pub low_humidity: i32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_temperature: 28,
            low_humidity: 45,
        }
    }
}

impl AlertThresholds {
    /// Every alert a refresh cycle raises, in temperature, humidity, motion
    /// order. The checks are independent of each other.
    #[must_use]
    pub fn evaluate(&self, reading: EnvironmentReading, motion: bool) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if reading.temperature_c > self.high_temperature {
            alerts.push(Alert::HighTemperature {
                value: reading.temperature_c,
            });
        }
        if reading.humidity_pct < self.low_humidity {
            alerts.push(Alert::LowHumidity {
                value: reading.humidity_pct,
            });
        }
        if motion {
            alerts.push(Alert::MotionDetected);
        }
        alerts
    }
}
