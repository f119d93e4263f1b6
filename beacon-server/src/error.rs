use std::io;
use thiserror::Error;

/// Errors surfaced by the relay server itself.
///
/// Per-connection failures never show up here: a frame that cannot be
/// parsed or delivered is answered or logged on the spot, and the server
/// keeps running.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}
