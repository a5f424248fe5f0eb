//! Clock port: where "now" comes from.

use homesim_domain::time::WallClock;

/// Source of local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> WallClock;
}

/// The host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> WallClock {
        chrono::Local::now().naive_local()
    }
}
