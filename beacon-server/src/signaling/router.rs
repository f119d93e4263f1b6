use crate::connection::Connection;
use crate::room::RoomRegistry;
use beacon_core::SignalMessage;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Error reply for frames the relay cannot make sense of.
const INVALID_FORMAT: &str = "Invalid message format";

/// Decodes inbound frames and dispatches them to the registry.
///
/// A frame is handled in three tiers: a frame that parses as a known
/// client message is dispatched; valid JSON with an unrecognized (or
/// missing) `type` is logged and ignored; everything else earns the
/// sender an `error` reply.
pub struct MessageRouter {
    registry: Arc<RoomRegistry>,
}

impl MessageRouter {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Handle one inbound text frame from `conn`.
    pub fn handle_frame(&self, conn: &Arc<Connection>, raw: &str) {
        match SignalMessage::from_json(raw) {
            Ok(msg) => self.dispatch(conn, msg),
            Err(_) => self.reject(conn, raw),
        }
    }

    fn dispatch(&self, conn: &Arc<Connection>, msg: SignalMessage) {
        match msg {
            SignalMessage::Join { room_id } => {
                if room_id.is_empty() {
                    warn!("Join without a room id from client {}", conn.id());
                    conn.send(&SignalMessage::error(INVALID_FORMAT));
                    return;
                }
                self.registry.join(conn, room_id);
            }
            SignalMessage::Leave { room_id } => {
                if room_id.is_empty() {
                    warn!("Leave without a room id from client {}", conn.id());
                    conn.send(&SignalMessage::error(INVALID_FORMAT));
                    return;
                }
                self.registry.leave(conn, &room_id);
            }
            SignalMessage::Offer { .. }
            | SignalMessage::Answer { .. }
            | SignalMessage::IceCandidate { .. } => self.relay(conn, msg),
            SignalMessage::Joined { .. } | SignalMessage::Error { .. } => {
                warn!("Unknown message type: {}", msg.kind());
            }
        }
    }

    /// Forward a negotiation frame to the rest of its room. The target
    /// is the room named in the frame, or the sender's current room when
    /// the frame names none.
    fn relay(&self, conn: &Arc<Connection>, msg: SignalMessage) {
        let target = msg
            .room_id()
            .filter(|room_id| !room_id.is_empty())
            .cloned()
            .or_else(|| conn.room());

        let Some(room_id) = target else {
            warn!(
                "Dropping {} from client {}: no target room",
                msg.kind(),
                conn.id()
            );
            return;
        };

        debug!("Relaying {} message in room {}", msg.kind(), room_id);
        self.registry.relay_to(&room_id, conn.id(), &msg);
    }

    /// Sort out a frame that did not parse as a client message.
    fn reject(&self, conn: &Arc<Connection>, raw: &str) {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => match value.get("type").and_then(Value::as_str) {
                Some(tag) if SignalMessage::is_client_kind(tag) => {
                    warn!("Malformed {} message from client {}", tag, conn.id());
                    conn.send(&SignalMessage::error(INVALID_FORMAT));
                }
                Some(tag) => warn!("Unknown message type: {}", tag),
                None => warn!("Message without a type from client {}", conn.id()),
            },
            Err(e) => {
                warn!("Invalid message from client {}: {}", conn.id(), e);
                conn.send(&SignalMessage::error(INVALID_FORMAT));
            }
        }
    }
}
