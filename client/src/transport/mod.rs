//! The byte-level boundary to whatever carries frames to and from the
//! server. Connection setup and reliability live on the other side of it.

use thiserror::Error;

/// Errors a transport reports when it cannot take an outbound buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No connection is established
    #[error("Transport is not connected")]
    NotConnected,

    /// The transport failed to send the buffer
    #[error("Send failed: {0}")]
    SendFailed(String),
}

pub trait Transport {
    /// Sends one outbound buffer. On error the caller keeps the buffer and
    /// retries on a later tick.
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Receives the next inbound buffer, if one is ready.
    fn receive(&mut self) -> Option<Vec<u8>>;

    fn is_connected(&self) -> bool;

    /// Human-readable description of the last transport-side failure.
    fn last_error(&self) -> Option<String>;
}
