use axon_shared::{ActionKind, Frame, FrameWriter, FRAME_HEADER_SIZE};
use log::warn;

use crate::error::EngineError;

/// Outbound frames waiting for the next successful send.
pub struct OutboundBuffer {
    writer: FrameWriter,
    max_bytes: usize,
    frames: usize,
}

impl OutboundBuffer {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            writer: FrameWriter::new(),
            max_bytes,
            frames: 0,
        }
    }

    /// Append an Invoke frame. Invokes are not addressed to an entity, so
    /// the entity id is always zero.
    ///
    /// When the frame would not fit under the bound it is dropped and the
    /// buffer is left as it was.
    pub fn push_invoke(&mut self, type_id: u32, payload: &[u8]) -> Result<(), EngineError> {
        let frame_len = FRAME_HEADER_SIZE + payload.len();
        let pending = self.writer.len();
        if pending + frame_len > self.max_bytes {
            warn!(
                "Dropping invoke for type id {}: {} byte(s) pending, frame of {} byte(s), limit {}",
                type_id, pending, frame_len, self.max_bytes
            );
            return Err(EngineError::OutboundBufferFull {
                pending,
                frame_len,
                max: self.max_bytes,
            });
        }

        self.writer
            .write(&Frame::new(ActionKind::Invoke, 0, type_id, payload))?;
        self.frames += 1;
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        self.writer.as_slice()
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn clear(&mut self) {
        self.writer.clear();
        self.frames = 0;
    }

    /// Take the pending bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        let bytes = self.writer.as_slice().to_vec();
        self.clear();
        bytes
    }
}
