use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Point-in-time occupancy of a single room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomStats {
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
    #[serde(rename = "clientCount")]
    pub client_count: usize,
}

/// Point-in-time occupancy of the whole relay, as reported by the
/// periodic stats log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerStats {
    #[serde(rename = "totalRooms")]
    pub total_rooms: usize,
    #[serde(rename = "totalClients")]
    pub total_clients: usize,
    pub rooms: Vec<RoomStats>,
}
