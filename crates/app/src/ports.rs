//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod alerts;
pub mod clock;
pub mod feedback;
pub mod log_store;
pub mod random;

pub use alerts::AlertPublisher;
pub use clock::{Clock, LocalClock};
pub use feedback::{Feedback, Silent};
pub use log_store::LogStore;
pub use random::RandomSource;
