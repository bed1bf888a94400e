use crate::{error::SerdeErr, tag::Tag};

/// Growable writer for tagged values.
///
/// Containers are written as a begin tag, their contents, and an explicit
/// `End` tag, so a container can be streamed out in a single pass without
/// knowing its length up front.
pub struct TagWriter {
    buffer: Vec<u8>,
}

impl TagWriter {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Cut the buffer back to `len` bytes, discarding anything written after.
    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    fn write_tag(&mut self, tag: Tag) {
        self.buffer.push(tag.to_u8());
    }

    fn write_length_prefixed(&mut self, tag: Tag, payload: &[u8]) -> Result<(), SerdeErr> {
        let len = length_prefix(payload.len())?;
        self.write_tag(tag);
        self.write_raw_u32(len);
        self.buffer.extend_from_slice(payload);
        Ok(())
    }

    // Raw (untagged) little-endian integers, used by frame headers

    pub fn write_raw_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_raw_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_raw_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    // Tagged values

    pub fn write_nil(&mut self) {
        self.write_tag(Tag::Nil);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_tag(Tag::U8);
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_tag(Tag::U16);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_tag(Tag::U32);
        self.write_raw_u32(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_tag(Tag::U64);
        self.write_raw_u64(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_tag(Tag::I8);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_tag(Tag::I16);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_tag(Tag::I32);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_tag(Tag::I64);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_tag(Tag::F32);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_tag(Tag::F64);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_tag(Tag::Bool);
        self.buffer.push(value as u8);
    }

    /// Writes the UTF-8 byte length, the bytes, then a NUL terminator that is
    /// not counted in the length.
    pub fn write_str(&mut self, value: &str) -> Result<(), SerdeErr> {
        self.write_length_prefixed(Tag::Str, value.as_bytes())?;
        self.buffer.push(0);
        Ok(())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), SerdeErr> {
        self.write_length_prefixed(Tag::Bytes, value)
    }

    pub fn begin_array(&mut self) {
        self.write_tag(Tag::Array);
    }

    pub fn end_array(&mut self) {
        self.write_tag(Tag::End);
    }

    pub fn begin_object(&mut self) {
        self.write_tag(Tag::Object);
    }

    pub fn end_object(&mut self) {
        self.write_tag(Tag::End);
    }

    /// Object keys are plain strings.
    pub fn write_key(&mut self, key: &str) -> Result<(), SerdeErr> {
        self.write_str(key)
    }
}

/// Length prefixes are u32 on the wire.
fn length_prefix(len: usize) -> Result<u32, SerdeErr> {
    u32::try_from(len).map_err(|_| SerdeErr::LengthOverflow { len })
}

impl Default for TagWriter {
    fn default() -> Self {
        Self::new()
    }
}
