//! Shared protocol model for the beacon signaling relay.
//!
//! Everything that crosses the wire (or identifies something that does)
//! lives here: room and client identifiers, the signaling message
//! vocabulary, and the stats snapshot shapes. The crate carries no
//! transport code.

pub mod model;

pub use model::{ClientId, RoomId, RoomStats, ServerStats, SignalMessage};
