use axum::extract::ws::Message;
use beacon_core::{ClientId, RoomId, SignalMessage};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Liveness of a single WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Liveness {
    /// Socket is up, frames may be queued for delivery.
    Open = 0,
    /// Teardown has started, new frames are dropped.
    Closing = 1,
    /// Socket tasks exited and registry cleanup ran.
    Closed = 2,
}

impl Liveness {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Open,
            1 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// One client of the relay.
///
/// Holds the write half of the socket (as a frame channel drained by the
/// socket's send task), the liveness state and the room the client is
/// currently in. Rooms reference connections through `Arc`, the server
/// task that accepted the socket owns the other end.
pub struct Connection {
    id: ClientId,
    sender: mpsc::UnboundedSender<Message>,
    liveness: AtomicU8,
    room: Mutex<Option<RoomId>>,
}

impl Connection {
    pub fn new(id: ClientId, sender: mpsc::UnboundedSender<Message>) -> Arc<Self> {
        Arc::new(Self {
            id,
            sender,
            liveness: AtomicU8::new(Liveness::Open as u8),
            room: Mutex::new(None),
        })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn liveness(&self) -> Liveness {
        Liveness::from_u8(self.liveness.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.liveness() == Liveness::Open
    }

    /// Flip `Open` → `Closing`. Returns true for exactly one caller, so
    /// registry cleanup runs once no matter how many paths race to it.
    pub fn begin_close(&self) -> bool {
        self.liveness
            .compare_exchange(
                Liveness::Open as u8,
                Liveness::Closing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn finish_close(&self) {
        self.liveness.store(Liveness::Closed as u8, Ordering::Release);
    }

    /// The room this client is currently in, if any.
    pub fn room(&self) -> Option<RoomId> {
        self.room.lock().clone()
    }

    /// Record `room_id` as the current room, returning the previous one.
    pub fn set_room(&self, room_id: RoomId) -> Option<RoomId> {
        self.room.lock().replace(room_id)
    }

    /// Clear the recorded room only if it is `room_id`, so a stray leave
    /// for some other room cannot wipe the real membership.
    pub fn clear_room(&self, room_id: &RoomId) {
        let mut slot = self.room.lock();
        if slot.as_ref() == Some(room_id) {
            *slot = None;
        }
    }

    /// Take the recorded room, leaving none. Second caller gets `None`,
    /// which is what makes disconnect idempotent.
    pub fn take_room(&self) -> Option<RoomId> {
        self.room.lock().take()
    }

    /// Serialize and queue a frame for this client. Fire and forget:
    /// failures are logged, never surfaced.
    pub fn send(&self, msg: &SignalMessage) {
        match encode_frame(msg) {
            Ok(frame) => self.send_frame(frame),
            Err(e) => error!("Failed to serialize {} frame: {}", msg.kind(), e),
        }
    }

    /// Queue an already-encoded frame. Drops it if the connection is no
    /// longer open or the send task has gone away.
    pub fn send_frame(&self, frame: Message) {
        if !self.is_open() {
            return;
        }
        if self.sender.send(frame).is_err() {
            warn!("Dropping frame for closed client {}", self.id);
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("liveness", &self.liveness())
            .field("room", &self.room.lock())
            .finish()
    }
}

/// Serialize a signaling frame into a WebSocket text message.
///
/// Broadcasts encode once and clone the message per receiver instead of
/// re-serializing for each member.
pub fn encode_frame(msg: &SignalMessage) -> Result<Message, serde_json::Error> {
    Ok(Message::Text(msg.to_json()?.into()))
}
