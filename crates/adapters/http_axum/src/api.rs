//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod logs;
pub mod sse;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use homesim_app::ports::LogStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: LogStore + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(status::get::<S>))
        .route("/devices", get(devices::list::<S>))
        .route("/devices/{id}", get(devices::get::<S>))
        .route("/devices/{id}/toggle", post(devices::toggle::<S>))
        .route("/logs", get(logs::list::<S>))
        .route("/alerts/stream", get(sse::stream::<S>))
}
