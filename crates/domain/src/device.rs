//! Device: a simulated appliance with a binary on/off state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identity of one of the two simulated appliances.
///
/// Serializes as `"Light"`/`"Fan"`; parsing and deserializing ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DeviceId {
    Light,
    Fan,
}

impl DeviceId {
    /// Every device the home is built with, in display order.
    pub const ALL: [Self; 2] = [Self::Light, Self::Fan];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Fan => "Fan",
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownDevice(s.to_string()))
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Binary power state of a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("on") {
            Ok(Self::On)
        } else if s.eq_ignore_ascii_case("off") {
            Ok(Self::Off)
        } else {
            Err(ValidationError::UnknownPowerState(s.to_string()))
        }
    }
}

impl TryFrom<String> for PowerState {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A simulated on/off appliance.
///
/// Devices live for the whole process and are only mutated by explicit
/// toggles, the auto-light automation and schedule rules. Every setter is
/// total and idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub state: PowerState,
}

impl Device {
    /// A device in the [`Off`](PowerState::Off) state.
    #[must_use]
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            state: PowerState::Off,
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    pub fn turn_on(&mut self) {
        self.state = PowerState::On;
    }

    pub fn turn_off(&mut self) {
        self.state = PowerState::Off;
    }

    /// Force the device into `state`.
    pub fn set(&mut self, state: PowerState) {
        self.state = state;
    }

    /// Flip the device and return the state it ends up in.
    pub fn toggle(&mut self) -> PowerState {
        self.state = self.state.flipped();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_off() {
        let device = Device::new(DeviceId::Light);
        assert!(!device.is_on());
        assert_eq!(device.state, PowerState::Off);
    }

    #[test]
    fn should_be_idempotent_when_turned_on_twice() {
        let mut device = Device::new(DeviceId::Fan);
        device.turn_on();
        device.turn_on();
        assert!(device.is_on());
        device.turn_off();
        device.turn_off();
        assert!(!device.is_on());
    }

    #[test]
    fn should_match_toggle_parity() {
        for toggles in 0..9 {
            let mut device = Device::new(DeviceId::Light);
            for _ in 0..toggles {
                device.toggle();
            }
            assert_eq!(device.is_on(), toggles % 2 == 1, "after {toggles} toggles");
        }
    }

    #[test]
    fn should_return_new_state_from_toggle() {
        let mut device = Device::new(DeviceId::Fan);
        assert_eq!(device.toggle(), PowerState::On);
        assert_eq!(device.toggle(), PowerState::Off);
    }

    #[test]
    fn should_force_state_with_set() {
        let mut device = Device::new(DeviceId::Light);
        device.set(PowerState::On);
        assert!(device.is_on());
        device.set(PowerState::On);
        assert!(device.is_on());
    }

    #[test]
    fn should_parse_device_id_case_insensitively() {
        assert_eq!("light".parse::<DeviceId>().unwrap(), DeviceId::Light);
        assert_eq!("FAN".parse::<DeviceId>().unwrap(), DeviceId::Fan);
        assert!("heater".parse::<DeviceId>().is_err());
    }

    #[test]
    fn should_display_power_state_uppercase() {
        assert_eq!(PowerState::On.to_string(), "ON");
        assert_eq!(PowerState::Off.to_string(), "OFF");
    }

    #[test]
    fn should_parse_power_state() {
        assert_eq!("ON".parse::<PowerState>().unwrap(), PowerState::On);
        assert_eq!("off".parse::<PowerState>().unwrap(), PowerState::Off);
        assert!("dim".parse::<PowerState>().is_err());
    }

    #[test]
    fn should_serialize_power_state_uppercase() {
        let json = serde_json::to_string(&PowerState::On).unwrap();
        assert_eq!(json, "\"ON\"");
    }

    #[test]
    fn should_deserialize_ids_and_states_ignoring_case() {
        let device: Device = serde_json::from_str(r#"{"id":"fan","state":"on"}"#).unwrap();
        assert_eq!(device.id, DeviceId::Fan);
        assert_eq!(device.state, PowerState::On);

        let json = serde_json::to_value(device).unwrap();
        assert_eq!(json, serde_json::json!({"id": "Fan", "state": "ON"}));
    }

    #[test]
    fn should_reject_unknown_device_when_deserializing() {
        let result = serde_json::from_str::<DeviceId>(r#""oven""#);
        assert!(result.unwrap_err().to_string().contains("oven"));
    }
}
