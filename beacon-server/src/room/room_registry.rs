use crate::connection::{Connection, encode_frame};
use crate::room::Room;
use beacon_core::{ClientId, RoomId, RoomStats, ServerStats, SignalMessage};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, error, info};

/// The process-wide RoomId → Room mapping.
///
/// Every membership mutation goes through here, and each one holds the
/// room's map entry for the whole mutation, so concurrent joins and
/// leaves on one room cannot interleave. Notifications go out to a
/// member snapshot taken inside that critical section and are sent after
/// it is released. Deliveries are queued on each member's frame channel
/// and never block, so a dead or slow peer cannot stall the rest of the
/// room.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Room>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Put `conn` into the room named `room_id`, creating it on demand.
    ///
    /// The joiner gets a `joined` ack carrying the member count, everyone
    /// already present gets a `join` notification. A client can only be
    /// in one room at a time: joining a second room leaves the first as
    /// if an explicit leave had been sent. A join that races the
    /// connection's teardown is dropped rather than inserted.
    pub fn join(&self, conn: &Arc<Connection>, room_id: RoomId) -> usize {
        if let Some(previous) = conn.set_room(room_id.clone()) {
            if previous != room_id {
                debug!(
                    "Client {} switches room {} -> {}",
                    conn.id(),
                    previous,
                    room_id
                );
                self.remove_member(&previous, conn.id());
            }
        }

        // The liveness check sits inside the critical section: a teardown
        // that already flipped the state is observed here and the join is
        // dropped, one that runs later finds the member and removes it.
        let joined = match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut entry) if conn.is_open() => {
                entry.get_mut().insert(conn.clone());
                Some((entry.get().len(), entry.get().others(conn.id())))
            }
            Entry::Vacant(entry) if conn.is_open() => {
                info!("Creating new room: {}", room_id);
                let mut room = Room::new(room_id.clone());
                room.insert(conn.clone());
                entry.insert(room);
                Some((1, Vec::new()))
            }
            _ => None,
        };

        let Some((count, others)) = joined else {
            conn.clear_room(&room_id);
            debug!("Dropping join from closed client {}", conn.id());
            return 0;
        };

        info!(
            "Client {} joined room {}. Total clients: {}",
            conn.id(),
            room_id,
            count
        );

        conn.send(&SignalMessage::joined(room_id.clone(), count));
        broadcast(&others, &SignalMessage::Join { room_id });

        count
    }

    /// Take `conn` out of the room named `room_id`. No-op if the room or
    /// the membership does not exist. Remaining members get a `leave`
    /// notification; an emptied room is deleted on the spot.
    pub fn leave(&self, conn: &Arc<Connection>, room_id: &RoomId) {
        conn.clear_room(room_id);
        self.remove_member(room_id, conn.id());
    }

    /// Drop whatever membership `conn` still has. Safe to call more than
    /// once; only the first call after a join does anything.
    pub fn disconnect(&self, conn: &Arc<Connection>) {
        if let Some(room_id) = conn.take_room() {
            self.remove_member(&room_id, conn.id());
        }
    }

    /// Deliver `msg` to every open member of `room_id` except the
    /// sender. A missing room is not an error: the last peer may have
    /// just disconnected. Returns how many members the frame was queued
    /// for.
    pub fn relay_to(&self, room_id: &RoomId, sender: ClientId, msg: &SignalMessage) -> usize {
        let targets = match self.rooms.get(room_id) {
            Some(room) => room.others(sender),
            None => {
                debug!("Dropping {} for unknown room {}", msg.kind(), room_id);
                return 0;
            }
        };

        let frame = match encode_frame(msg) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to serialize {} frame: {}", msg.kind(), e);
                return 0;
            }
        };

        let mut delivered = 0;
        for conn in &targets {
            if conn.is_open() {
                conn.send_frame(frame.clone());
                delivered += 1;
            }
        }
        delivered
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of clients currently in any room.
    pub fn client_count(&self) -> usize {
        self.rooms.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn has_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Occupancy snapshot, rooms ordered by id so logs and tests are
    /// deterministic.
    pub fn stats(&self) -> ServerStats {
        let mut rooms: Vec<RoomStats> = self
            .rooms
            .iter()
            .map(|entry| RoomStats {
                room_id: entry.key().clone(),
                client_count: entry.value().len(),
            })
            .collect();
        rooms.sort_by(|a, b| a.room_id.as_str().cmp(b.room_id.as_str()));

        ServerStats {
            total_rooms: rooms.len(),
            total_clients: rooms.iter().map(|room| room.client_count).sum(),
            rooms,
        }
    }

    /// Remove the membership and, if that emptied the room, the room
    /// itself, in one critical section. The leave notification goes to a
    /// snapshot of whoever remains.
    fn remove_member(&self, room_id: &RoomId, client_id: ClientId) {
        let remaining = {
            let Entry::Occupied(mut entry) = self.rooms.entry(room_id.clone()) else {
                return;
            };
            if !entry.get_mut().remove(&client_id) {
                return;
            }
            if entry.get().is_empty() {
                entry.remove();
                info!("Room {} deleted (empty)", room_id);
                Vec::new()
            } else {
                entry.get().members()
            }
        };

        info!("Client {} left room {}", client_id, room_id);

        broadcast(
            &remaining,
            &SignalMessage::Leave {
                room_id: room_id.clone(),
            },
        );
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}

/// Encode `msg` once and queue it on every target connection.
fn broadcast(targets: &[Arc<Connection>], msg: &SignalMessage) {
    if targets.is_empty() {
        return;
    }

    let frame = match encode_frame(msg) {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to serialize {} frame: {}", msg.kind(), e);
            return;
        }
    };

    for conn in targets {
        conn.send_frame(frame.clone());
    }
}
