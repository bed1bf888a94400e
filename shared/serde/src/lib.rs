//! Self-describing tagged binary values.
//!
//! Every value is a one-byte [`Tag`] followed by a payload whose layout the
//! tag fixes. Containers are closed by an explicit `End` tag, so a stream can
//! be walked, skipped or partially decoded without any schema.
//!
//! Native types move across through serde: [`to_bytes`] and [`from_bytes`]
//! for whole buffers, [`TagWriter`] and [`TagReader`] for streaming.

mod error;
mod key;
mod reader;
mod tag;
mod value;
mod writer;

pub mod as_bytes;
pub mod de;
pub mod ser;

pub use de::{from_bytes, from_reader, Deserializer};
pub use error::SerdeErr;
pub use reader::{TagReader, MAX_DEPTH};
pub use ser::{to_bytes, to_writer, Serializer};
pub use tag::Tag;
pub use value::Value;
pub use writer::TagWriter;
