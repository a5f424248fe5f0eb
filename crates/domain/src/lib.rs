//! # homesim-domain
//!
//! Pure domain model for the homesim smart-home simulation.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, log timestamps, time of day
//! - Define **Devices** (the light and the fan, each a binary on/off toggle)
//! - Define **Readings** (temperature/humidity snapshots)
//! - Define **Log entries** (append-only records of device state changes)
//! - Define **Schedule rules** (fixed time-of-day actions)
//! - Define **Alerts** (threshold notifications for the presentation layer)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod alert;
pub mod device;
pub mod log_entry;
pub mod reading;
pub mod schedule;
