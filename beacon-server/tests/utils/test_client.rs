use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Timeout for receiving one signaling frame (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// How long to listen when asserting that no frame arrives (ms).
pub const SILENCE_TIMEOUT_MS: u64 = 250;

/// One WebSocket client talking to a relay under test.
pub struct TestClient {
    ws: WsStream,
}

impl TestClient {
    /// Connect to the relay listening on `addr`.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (ws, _) = connect_async(format!("ws://{addr}"))
            .await
            .context("Failed to connect to relay")?;
        Ok(Self { ws })
    }

    /// Send a raw text frame.
    pub async fn send_raw(&mut self, raw: &str) -> Result<()> {
        self.ws
            .send(Message::text(raw))
            .await
            .context("Failed to send text frame")
    }

    /// Send a JSON value as a text frame.
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.send_raw(&value.to_string()).await
    }

    /// Send a JSON value packed into a binary frame.
    pub async fn send_json_binary(&mut self, value: &Value) -> Result<()> {
        self.ws
            .send(Message::binary(value.to_string().into_bytes()))
            .await
            .context("Failed to send binary frame")
    }

    pub async fn join(&mut self, room_id: &str) -> Result<()> {
        self.send_json(&json!({"type": "join", "roomId": room_id}))
            .await
    }

    pub async fn leave(&mut self, room_id: &str) -> Result<()> {
        self.send_json(&json!({"type": "leave", "roomId": room_id}))
            .await
    }

    /// Read the next text frame as JSON.
    pub async fn recv_json(&mut self) -> Result<Value> {
        loop {
            let msg = timeout(Duration::from_millis(SIGNAL_TIMEOUT_MS), self.ws.next())
                .await
                .context("Timeout waiting for frame")?
                .context("Stream closed")?
                .context("WebSocket error")?;
            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).context("Frame is not valid JSON");
            }
        }
    }

    /// Assert that no frame arrives within a short window.
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(Duration::from_millis(SILENCE_TIMEOUT_MS), self.ws.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(msg))) => anyhow::bail!("Expected silence, got {msg:?}"),
            Ok(Some(Err(e))) => anyhow::bail!("WebSocket error while expecting silence: {e}"),
            Ok(None) => anyhow::bail!("Stream closed while expecting silence"),
        }
    }

    /// Close the connection gracefully.
    pub async fn close(mut self) -> Result<()> {
        self.ws
            .close(None)
            .await
            .context("Failed to close connection")
    }

    /// Drop the connection with no closing handshake, like a client
    /// that crashed or lost its network.
    pub fn abort(self) {}
}
