//! GET /api/complaints/{code}/live: WebSocket tracking
//!
//! Sends the tracking view on connect, then a freshly rebuilt view after
//! every change signal for the complaint. Client messages are ignored apart
//! from ping/close.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, StreamExt};
use shared::Language;
use tokio::sync::broadcast::error::RecvError;

use super::complaint::LangQuery;
use crate::error::ServiceError;
use crate::live;
use crate::state::AppState;
use crate::tracking::{self, TrackingView};

pub async fn track_live(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LangQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ServiceError> {
    let lang = query.language();
    // Resolve before upgrading so unknown codes get a normal error response
    let view = tracking::track(&state.source(), &code, lang, &state.time_format).await?;

    Ok(ws.on_upgrade(move |socket| stream_view(socket, state, view, lang)))
}

async fn send_view<S>(sink: &mut S, view: &TrackingView) -> bool
where
    S: Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(view) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize tracking view");
            return false;
        }
    };
    sink.send(Message::Text(json.into())).await.is_ok()
}

async fn stream_view(socket: WebSocket, state: AppState, initial: TrackingView, lang: Language) {
    let complaint_id = initial.complaint.id;
    let code = initial.complaint.complaint_code.clone();
    let mut changes = state.feed.subscribe(complaint_id);
    let (mut ws_sink, mut ws_stream) = socket.split();

    tracing::debug!(
        complaint_id,
        code = %code,
        subscribers = state.feed.subscriber_count(complaint_id),
        "Live tracking connected"
    );

    // Re-read after subscribing so a change landing in between is not lost
    let first = tracking::track(&state.source(), &code, lang, &state.time_format)
        .await
        .unwrap_or(initial);
    if !send_view(&mut ws_sink, &first).await {
        return;
    }

    loop {
        tokio::select! {
            change = changes.recv() => {
                match change {
                    // A lagged receiver missed signals, but one re-fetch covers them all
                    Ok(_) | Err(RecvError::Lagged(_)) => {
                        live::drain_pending(&mut changes);
                        match tracking::track(&state.source(), &code, lang, &state.time_format).await {
                            Ok(view) => {
                                if !send_view(&mut ws_sink, &view).await {
                                    break;
                                }
                            }
                            Err(e) => {
                                let err: shared::error::AppError = e.into();
                                tracing::warn!(complaint_id, error = %err, "Live tracking re-fetch failed");
                                let body = serde_json::json!({ "error": err.message, "code": err.code });
                                let _ = ws_sink.send(Message::Text(body.to_string().into())).await;
                            }
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    drop(changes);
    tracing::debug!(complaint_id, code = %code, "Live tracking disconnected");
}
