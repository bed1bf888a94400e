//! Action frames: the unit of the replication stream.
//!
//! ```text
//! u8  action kind   (1=Spawn, 2=Despawn, 3=Change, 4=Invoke)
//! u64 entity id     (LE)
//! u32 type id       (LE)
//! u32 payload len   (LE)
//! u8[payload len]   tagged-value payload, empty for Spawn/Despawn
//! ```

mod action;
mod error;
mod frame;

pub use action::ActionKind;
pub use error::FrameError;
pub use frame::{Frame, FrameReader, FrameWriter, FRAME_HEADER_SIZE};
