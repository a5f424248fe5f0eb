//! # homesim-adapter-virtual
//!
//! Simulated hardware backing the virtual devices.
//!
//! ## Provided capabilities
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`ThreadRandom`] | `RandomSource` | Fresh entropy from the thread-local RNG |
//! | [`SeededRandom`] | `RandomSource` | `ChaCha8` stream, reproducible from a seed |
//! | [`TerminalBell`] | `Feedback` | Rings the terminal bell (`BEL`) on stdout |
//!
//! ## Dependency rule
//!
//! Depends on `homesim-app` (port traits) only.

mod feedback;
mod random;

pub use feedback::TerminalBell;
pub use random::{SeededRandom, ThreadRandom};
