//! Server-Sent Events (SSE) stream of sensor alerts.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use homesim_app::ports::LogStore;
use homesim_domain::alert::Alert;

use crate::state::AppState;

/// `GET /api/alerts/stream`
///
/// Each alert raised by a status refresh is sent as a JSON `data:` frame
/// with the alert kind as the SSE event name. Subscribers that fall behind
/// lose the oldest alerts rather than blocking the refresh.
pub async fn stream<S>(
    State(state): State<AppState<S>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>
where
    S: LogStore + Send + Sync + 'static,
{
    let alerts = BroadcastStream::new(state.alerts.subscribe()).filter_map(|result| match result {
        Ok(alert) => to_event(&alert),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some alerts were dropped");
            None
        }
    });

    Sse::new(alerts).keep_alive(KeepAlive::default())
}

fn to_event(alert: &Alert) -> Option<Result<Event, Infallible>> {
    match serde_json::to_string(alert) {
        Ok(json) => Some(Ok(Event::default().event(alert.kind()).data(json))),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize alert for SSE stream");
            None
        }
    }
}
