//! # homesim-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LogStore`: append & query the persisted event log
//!   - `RandomSource`: uniform integers for the simulated sensors
//!   - `Clock`: local wall-clock time
//!   - `Feedback`: the audible click on device changes
//!   - `AlertPublisher`: fire-and-forget threshold alerts
//! - Define the **use-cases**:
//!   - `Home`: application state: devices, last status, toggles, automations
//!   - `EventLog`: timestamps entries and fills in missing readings
//!   - `MotionSensor` / `EnvironmentSampler`: simulated sensors
//!   - `Scheduler` + periodic tasks: status refresh, auto light, schedule check
//! - Provide **in-process infrastructure** (alert bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only (plus `tokio` for sync primitives and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod alert_bus;
pub mod home;
pub mod ports;
pub mod scheduler;
pub mod sensors;
pub mod services;
pub mod tasks;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
