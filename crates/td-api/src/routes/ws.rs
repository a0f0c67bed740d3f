//! WebSocket endpoint streaming `WsEvent` frames to dashboards.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast;

use crate::events::WsEvent;
use crate::state::AppState;

/// GET /api/v1/ws: upgrade to WebSocket for intent events.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let rx = state.event_tx.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, rx))
}

/// Encode one event as a JSON text frame.
fn event_frame(event: &WsEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, "dropping unserializable event");
            None
        }
    }
}

/// Next frame to push, or `None` once the broadcast channel is closed.
/// Lagged receivers skip what they missed and carry on.
async fn next_frame(rx: &mut broadcast::Receiver<WsEvent>) -> Option<Message> {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(frame) = event_frame(&event) {
                    return Some(frame);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "WebSocket client lagged behind intent events");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

async fn stream_events(mut socket: WebSocket, mut rx: broadcast::Receiver<WsEvent>) {
    tracing::info!("WebSocket client connected");

    loop {
        tokio::select! {
            frame = next_frame(&mut rx) => {
                let Some(frame) = frame else { break };
                if socket.send(frame).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Listen-only: client text is ignored.
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!("WebSocket client disconnected");
}
