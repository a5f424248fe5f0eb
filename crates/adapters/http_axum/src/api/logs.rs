//! JSON handler for the persisted event log.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homesim_app::ports::LogStore;
use homesim_domain::log_entry::LogEntry;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

impl LogsQuery {
    fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

pub enum ListResponse {
    Ok(Json<Vec<LogEntry>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/logs?limit=N`: newest entries first.
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<LogsQuery>,
) -> Result<ListResponse, ApiError>
where
    S: LogStore + Send + Sync + 'static,
{
    let entries = state.home.recent_logs(query.effective_limit()).await?;
    Ok(ListResponse::Ok(Json(entries)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use homesim_domain::device::DeviceId;
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{body_json, test_state};

    #[test]
    fn should_default_and_clamp_limit() {
        assert_eq!(LogsQuery::default().effective_limit(), 50);
        assert_eq!(LogsQuery { limit: Some(3) }.effective_limit(), 3);
        assert_eq!(LogsQuery { limit: Some(10_000) }.effective_limit(), 500);
    }

    #[tokio::test]
    async fn should_return_newest_entries_first() {
        let (state, _) = test_state([]);
        state.home.toggle_device(DeviceId::Light).await.unwrap();
        state.home.toggle_device(DeviceId::Fan).await.unwrap();
        state.home.toggle_device(DeviceId::Light).await.unwrap();
        let app = crate::router::build(state);

        let response = app
            .oneshot(Request::get("/api/logs?limit=2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], 3);
        assert_eq!(entries[0]["device"], "Light");
        assert_eq!(entries[0]["status"], "OFF");
        assert_eq!(entries[1]["device"], "Fan");
    }

    #[tokio::test]
    async fn should_reject_non_numeric_limit() {
        let (state, _) = test_state([]);
        let app = crate::router::build(state);

        let response = app
            .oneshot(
                Request::get("/api/logs?limit=lots")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
