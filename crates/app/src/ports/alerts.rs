//! Alert port: fire-and-forget notifications for the presentation layer.

use homesim_domain::alert::Alert;

/// Delivers [`Alert`]s to whoever is listening.
///
/// Delivery is best effort: no acknowledgment, no de-duplication of repeated
/// alerts across refresh cycles.
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: Alert);
}

impl<T: AlertPublisher + ?Sized> AlertPublisher for std::sync::Arc<T> {
    fn publish(&self, alert: Alert) {
        (**self).publish(alert);
    }
}
