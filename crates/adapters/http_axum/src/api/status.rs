//! Current device states and the last sensor observation.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homesim_app::home::StatusSnapshot;
use homesim_app::ports::LogStore;
use homesim_domain::device::PowerState;
use homesim_domain::reading::EnvironmentReading;

use crate::state::AppState;

/// Wire form of [`StatusSnapshot`].
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub light: PowerState,
    pub fan: PowerState,
    pub motion: bool,
    pub reading: Option<EnvironmentReading>,
    pub refreshed_at: Option<String>,
}

impl From<StatusSnapshot> for StatusBody {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            light: snapshot.light,
            fan: snapshot.fan,
            motion: snapshot.motion,
            reading: snapshot.reading,
            refreshed_at: snapshot.refreshed_at,
        }
    }
}

pub enum GetResponse {
    Ok(Json<StatusBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/status`
///
/// Reads the last observation; does not sample the sensors.
pub async fn get<S>(State(state): State<AppState<S>>) -> GetResponse
where
    S: LogStore + Send + Sync + 'static,
{
    let snapshot = state.home.status().await;
    GetResponse::Ok(Json(snapshot.into()))
}
