//! WebSocket signaling relay.
//!
//! beacon-server accepts WebSocket connections, sorts them into rooms by
//! a caller-chosen key and forwards WebRTC negotiation frames between
//! the members of a room. Frame payloads are never inspected: the relay
//! only does addressing and room lifecycle, the peers negotiate the
//! actual media transport among themselves.

pub mod connection;
pub mod error;
pub mod room;
pub mod server;
pub mod signaling;

pub use connection::{Connection, Liveness, encode_frame};
pub use error::RelayError;
pub use room::{Room, RoomRegistry};
pub use server::{RelayConfig, RelayState, create_app, create_router, run};
pub use signaling::{MessageRouter, ws_handler};
