mod client;
mod room;
mod signaling;
mod stats;

pub use client::ClientId;
pub use room::RoomId;
pub use signaling::SignalMessage;
pub use stats::{RoomStats, ServerStats};
