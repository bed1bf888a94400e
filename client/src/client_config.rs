/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Upper bound on the bytes waiting in the outbound buffer. An invoke
    /// that would grow the buffer past it is rejected.
    pub max_outbound_bytes: usize,
    /// Frames applied from a single inbound buffer before the rest of it is
    /// dropped. `None` applies every frame.
    pub max_frames_per_buffer: Option<usize>,
    /// Log frames that are dropped by policy (duplicate spawn, unknown entity
    /// or type id) at debug level.
    pub log_dropped_frames: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_outbound_bytes: 1024 * 1024,
            max_frames_per_buffer: None,
            log_dropped_frames: true,
        }
    }
}
