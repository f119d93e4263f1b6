use crate::connection::Connection;
use crate::server::RelayState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::ClientId;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<RelayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: RelayState) {
    let client_id = ClientId::new();
    info!("New client connected: {}", client_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let conn = Connection::new(client_id, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(frame).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let conn = conn.clone();
        let router = state.router().clone();

        async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => router.handle_frame(&conn, &text),
                    // some clients ship JSON in binary frames; decode the
                    // same way
                    Ok(Message::Binary(bytes)) => {
                        router.handle_frame(&conn, &String::from_utf8_lossy(&bytes));
                    }
                    Ok(Message::Close(_)) => break,
                    // axum answers pings by itself
                    Ok(Message::Ping(_) | Message::Pong(_)) => {}
                    Err(e) => {
                        warn!("WebSocket error from client {}: {}", conn.id(), e);
                        break;
                    }
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if conn.begin_close() {
        state.registry().disconnect(&conn);
        conn.finish_close();
    }

    info!("Client disconnected: {}", client_id);
}
