//! Wiring and request helpers shared by the handler tests.

use std::sync::Arc;

use axum::response::Response;

use homesim_app::alert_bus::AlertBus;
use homesim_app::home::Home;
use homesim_app::testing::{InMemoryLogStore, ScriptedRandom};

use crate::state::AppState;

/// A home over an in-memory log, with scripted sensor draws. Log readings
/// fall back to the low end of each range.
pub fn test_state(
    sensor_draws: impl IntoIterator<Item = i32>,
) -> (AppState<Arc<InMemoryLogStore>>, Arc<InMemoryLogStore>) {
    let store = Arc::new(InMemoryLogStore::default());
    let alerts = Arc::new(AlertBus::new(16));
    let home = Home::builder()
        .store(Arc::clone(&store))
        .sensor_random(Arc::new(ScriptedRandom::new(sensor_draws)))
        .log_random(Arc::new(ScriptedRandom::default()))
        .alerts(Arc::clone(&alerts) as _)
        .build()
        .unwrap();
    (AppState::new(Arc::new(home), alerts), store)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
