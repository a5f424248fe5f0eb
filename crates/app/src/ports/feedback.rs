//! Feedback port: user-perceivable confirmation of a device change.

/// Signals that a device changed because of a toggle or an automation.
pub trait Feedback: Send + Sync {
    fn click(&self);
}

/// Feedback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn click(&self) {}
}
