use crate::connection::Connection;
use beacon_core::{ClientId, RoomId};
use std::collections::HashMap;
use std::sync::Arc;

/// One signaling room: the set of clients allowed to exchange
/// negotiation frames with each other.
///
/// Rooms are plain data. All locking and lifecycle (including the rule
/// that an empty room must not outlive the operation that emptied it)
/// is the registry's job.
pub struct Room {
    id: RoomId,
    members: HashMap<ClientId, Arc<Connection>>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: HashMap::new(),
        }
    }

    /// Add a member. Returns false if it was already in the room.
    pub fn insert(&mut self, conn: Arc<Connection>) -> bool {
        self.members.insert(conn.id(), conn).is_none()
    }

    /// Remove a member. Returns false if it was not in the room.
    pub fn remove(&mut self, client_id: &ClientId) -> bool {
        self.members.remove(client_id).is_some()
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.members.contains_key(client_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Snapshot of all members, for broadcasting after the registry's
    /// critical section is released.
    pub fn members(&self) -> Vec<Arc<Connection>> {
        self.members.values().cloned().collect()
    }

    /// Snapshot of all members except `exclude`.
    pub fn others(&self, exclude: ClientId) -> Vec<Arc<Connection>> {
        self.members
            .values()
            .filter(|conn| conn.id() != exclude)
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("members", &self.members.len())
            .finish()
    }
}
