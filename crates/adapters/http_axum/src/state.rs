//! Shared application state for axum handlers.

use std::sync::Arc;

use homesim_app::alert_bus::AlertBus;
use homesim_app::home::Home;

/// Application state shared across all axum handlers.
///
/// Generic over the log store to avoid dynamic dispatch. `Clone` is
/// implemented manually so `S` itself does not need to be `Clone`.
pub struct AppState<S> {
    /// The simulated home.
    pub home: Arc<Home<S>>,
    /// Alert fan-out, subscribed to by SSE clients.
    pub alerts: Arc<AlertBus>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            home: Arc::clone(&self.home),
            alerts: Arc::clone(&self.alerts),
        }
    }
}

impl<S> AppState<S> {
    /// Create the state from handles that are also shared with the
    /// scheduler tasks.
    pub fn new(home: Arc<Home<S>>, alerts: Arc<AlertBus>) -> Self {
        Self { home, alerts }
    }
}
