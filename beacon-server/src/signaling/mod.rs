mod router;
mod ws_handler;

pub use router::*;
pub use ws_handler::*;
