use axon_shared::{FrameError, MapperError};
use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by the replication engine's outbound path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Queuing the frame would grow the outbound buffer past its bound
    #[error("Outbound buffer full: {pending} byte(s) pending, a {frame_len}-byte frame would exceed the {max}-byte limit")]
    OutboundBufferFull {
        pending: usize,
        frame_len: usize,
        max: usize,
    },

    /// The invoke value could not be encoded
    #[error("Failed to encode invoke payload: {0}")]
    Mapper(#[from] MapperError),

    /// The encoded frame could not be written
    #[error("Failed to write frame: {0}")]
    Frame(#[from] FrameError),

    /// The transport refused the outbound buffer
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
