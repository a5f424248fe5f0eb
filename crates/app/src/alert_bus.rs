//! In-process alert bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use homesim_domain::alert::Alert;

use crate::ports::AlertPublisher;

/// In-process alert bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the alert is simply dropped).
pub struct AlertBus {
    sender: broadcast::Sender<Alert>,
}

impl AlertBus {
    /// Create a new alert bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to alerts on this bus.
    ///
    /// Returns a receiver that will get all alerts published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.sender.subscribe()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl AlertPublisher for AlertBus {
    fn publish(&self, alert: Alert) {
        // send fails only when there are zero receivers
        let _ = self.sender.send(alert);
    }
}
