//! WebSocket streaming for real-time dashboard updates.
use crate::state::DashboardStore;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use std::sync::Arc;

/// Handler for WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(store): State<Arc<DashboardStore>>,
) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, store))
        .into_response()
}

async fn handle_socket(mut socket: WebSocket, store: Arc<DashboardStore>) {
    let mut rx = store.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            event = rx.recv() => {
                match event {
                    Ok(payload) => {
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        // Drop missed updates; clients can re-read /v1/dashboard.
                        tracing::debug!("Dashboard stream lagged by {} events", skipped);
                        continue;
                    }
                    Err(_) => break,
                }
            }
        }
    }
}
