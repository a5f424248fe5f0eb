//! # homesim-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** over the simulated home
//!   (`/api/status`, `/api/devices`, `/api/logs`)
//! - Translate `POST /api/devices/{id}/toggle` into a manual toggle
//! - Push sensor alerts to clients as **Server-Sent Events**
//!
//! ## Dependency rule
//! Depends on `homesim-app` (for `Home` and the port traits) and
//! `homesim-domain` (for the types used in response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
