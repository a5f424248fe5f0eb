//! JSON handlers for the simulated devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use homesim_app::ports::LogStore;
use homesim_domain::device::{Device, DeviceId};
use homesim_domain::error::{HomeError, NotFoundError};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and toggle endpoints.
pub enum DeviceResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// An id in the path that names no device is a missing resource, not a
/// malformed request.
fn parse_id(raw: &str) -> Result<DeviceId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(HomeError::from(NotFoundError {
            entity: "device",
            id: raw.to_string(),
        }))
    })
}

/// `GET /api/devices`
pub async fn list<S>(State(state): State<AppState<S>>) -> ListResponse
where
    S: LogStore + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.home.devices().await.to_vec()))
}

/// `GET /api/devices/{id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    S: LogStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    Ok(DeviceResponse::Ok(Json(state.home.device(id).await)))
}

/// `POST /api/devices/{id}/toggle`
pub async fn toggle<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    S: LogStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let device = state.home.toggle_device(id).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}
