use thiserror::Error;

/// Errors that end the parse of an inbound buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The buffer ends inside a frame header or payload
    #[error("Truncated frame: needed {needed} more byte(s) but only {remaining} remain")]
    Truncated { needed: usize, remaining: usize },

    /// The action byte is not one of the known action kinds
    #[error("Unknown action kind {0}")]
    UnknownAction(u8),

    /// A payload does not fit the u32 length prefix
    #[error("Payload of {len} bytes does not fit in a frame")]
    PayloadTooLarge { len: usize },
}
