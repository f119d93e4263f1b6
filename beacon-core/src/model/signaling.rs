use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One signaling frame, as it appears on the wire.
///
/// Frames are JSON objects tagged by a `type` field. `join`, `leave`,
/// `offer`, `answer` and `ice-candidate` travel client→server; `joined`
/// and `error` travel server→client only. The `data` payload of the
/// relay kinds is a session description or connectivity candidate the
/// relay never inspects, so it stays an untyped [`Value`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    /// Request to enter a room; doubles as the notification other
    /// members receive when someone enters.
    Join {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    /// Request to exit a room; doubles as the departure notification.
    Leave {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    Offer {
        #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    Answer {
        #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    IceCandidate {
        #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    /// Ack sent to a client right after it entered a room.
    Joined {
        #[serde(rename = "roomId")]
        room_id: RoomId,
        #[serde(rename = "clientsCount")]
        clients_count: usize,
    },
    Error {
        message: String,
    },
}

impl SignalMessage {
    #[must_use]
    pub fn joined(room_id: RoomId, clients_count: usize) -> Self {
        Self::Joined {
            room_id,
            clients_count,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire tag of this frame, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::Joined { .. } => "joined",
            Self::Error { .. } => "error",
        }
    }

    /// The room this frame explicitly names, if any.
    #[must_use]
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            Self::Join { room_id } | Self::Leave { room_id } | Self::Joined { room_id, .. } => {
                Some(room_id)
            }
            Self::Offer { room_id, .. }
            | Self::Answer { room_id, .. }
            | Self::IceCandidate { room_id, .. } => room_id.as_ref(),
            Self::Error { .. } => None,
        }
    }

    /// Whether `tag` is a message type clients are allowed to send.
    ///
    /// Well-formed frames with any other tag are dropped by the server
    /// instead of answered with an error.
    #[must_use]
    pub fn is_client_kind(tag: &str) -> bool {
        matches!(tag, "join" | "leave" | "offer" | "answer" | "ice-candidate")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
