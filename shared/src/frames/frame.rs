use axon_serde::{SerdeErr, TagReader, TagWriter};

use super::{action::ActionKind, error::FrameError};

/// Bytes before the payload: action, entity id, type id, payload length.
pub const FRAME_HEADER_SIZE: usize = 1 + 8 + 4 + 4;

/// One parsed action, borrowing its payload from the inbound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub action: ActionKind,
    pub entity_id: u64,
    pub type_id: u32,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    pub fn new(action: ActionKind, entity_id: u64, type_id: u32, payload: &'a [u8]) -> Self {
        Self {
            action,
            entity_id,
            type_id,
            payload,
        }
    }

    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload.len()
    }
}

/// Iterates the frames of one inbound buffer.
///
/// The first error is yielded once and ends the iteration: the rest of the
/// buffer is never resynchronised.
pub struct FrameReader<'a> {
    reader: TagReader<'a>,
    failed: bool,
}

impl<'a> FrameReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: TagReader::new(bytes),
            failed: false,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    fn read_frame(&mut self) -> Result<Frame<'a>, FrameError> {
        let action_byte = self.reader.read_raw_u8().map_err(truncated)?;
        let action = ActionKind::from_u8(action_byte).ok_or(FrameError::UnknownAction(action_byte))?;
        let entity_id = self.reader.read_raw_u64().map_err(truncated)?;
        let type_id = self.reader.read_raw_u32().map_err(truncated)?;
        let payload_len = self.reader.read_raw_u32().map_err(truncated)? as usize;
        let payload = self.reader.read_raw_bytes(payload_len).map_err(truncated)?;
        Ok(Frame::new(action, entity_id, type_id, payload))
    }
}

impl<'a> Iterator for FrameReader<'a> {
    type Item = Result<Frame<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_exhausted() {
            return None;
        }
        let result = self.read_frame();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

fn truncated(err: SerdeErr) -> FrameError {
    match err {
        SerdeErr::UnexpectedEnd { needed, remaining } => FrameError::Truncated { needed, remaining },
        // raw reads only ever run out of bytes
        _ => FrameError::Truncated {
            needed: 1,
            remaining: 0,
        },
    }
}

/// Appends frames to a growable buffer.
pub struct FrameWriter {
    writer: TagWriter,
}

impl FrameWriter {
    pub fn new() -> Self {
        Self {
            writer: TagWriter::new(),
        }
    }

    pub fn write(&mut self, frame: &Frame) -> Result<(), FrameError> {
        let len = u32::try_from(frame.payload.len())
            .map_err(|_| FrameError::PayloadTooLarge { len: frame.payload.len() })?;
        self.writer.write_raw_u8(frame.action.to_u8());
        self.writer.write_raw_u64(frame.entity_id);
        self.writer.write_raw_u32(frame.type_id);
        self.writer.write_raw_u32(len);
        self.writer.write_raw_bytes(frame.payload);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.writer.as_slice()
    }

    pub fn clear(&mut self) {
        self.writer.clear();
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.writer.to_bytes()
    }
}

impl Default for FrameWriter {
    fn default() -> Self {
        Self::new()
    }
}
