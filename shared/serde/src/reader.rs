use crate::{error::SerdeErr, tag::Tag};

/// Deepest container nesting a reader accepts before giving up.
pub const MAX_DEPTH: usize = 128;

/// Cursor over a borrowed buffer of tagged values.
///
/// Every typed read validates the tag first. Nothing is consumed when a read
/// fails on a tag mismatch, but the reader should be abandoned after any
/// error: its position is not guaranteed to sit on a value boundary.
#[derive(Clone)]
pub struct TagReader<'a> {
    bytes: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> TagReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Current container nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], SerdeErr> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(SerdeErr::UnexpectedEnd {
                needed: count,
                remaining,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.bytes[start..self.position])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let slice = self.take(N)?;
        let mut output = [0u8; N];
        output.copy_from_slice(slice);
        Ok(output)
    }

    // Raw (untagged) reads

    pub fn read_raw_u8(&mut self) -> Result<u8, SerdeErr> {
        Ok(self.take(1)?[0])
    }

    pub fn read_raw_u32(&mut self) -> Result<u32, SerdeErr> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_raw_u64(&mut self) -> Result<u64, SerdeErr> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_raw_bytes(&mut self, count: usize) -> Result<&'a [u8], SerdeErr> {
        self.take(count)
    }

    // Tags

    /// Look at the next tag without consuming it.
    pub fn peek_tag(&self) -> Result<Tag, SerdeErr> {
        let Some(byte) = self.bytes.get(self.position) else {
            return Err(SerdeErr::UnexpectedEnd {
                needed: 1,
                remaining: 0,
            });
        };
        Tag::from_u8(*byte).ok_or(SerdeErr::InvalidTag(*byte))
    }

    pub fn read_tag(&mut self) -> Result<Tag, SerdeErr> {
        let tag = self.peek_tag()?;
        self.position += 1;
        Ok(tag)
    }

    fn expect_tag(&mut self, expected: Tag) -> Result<(), SerdeErr> {
        let found = self.peek_tag()?;
        if found != expected {
            return Err(SerdeErr::mismatch(expected, found));
        }
        self.position += 1;
        Ok(())
    }

    // Tagged values

    pub fn read_nil(&mut self) -> Result<(), SerdeErr> {
        self.expect_tag(Tag::Nil)
    }

    pub fn read_u8(&mut self) -> Result<u8, SerdeErr> {
        self.expect_tag(Tag::U8)?;
        self.read_raw_u8()
    }

    pub fn read_u16(&mut self) -> Result<u16, SerdeErr> {
        self.expect_tag(Tag::U16)?;
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, SerdeErr> {
        self.expect_tag(Tag::U32)?;
        self.read_raw_u32()
    }

    pub fn read_u64(&mut self) -> Result<u64, SerdeErr> {
        self.expect_tag(Tag::U64)?;
        self.read_raw_u64()
    }

    pub fn read_i8(&mut self) -> Result<i8, SerdeErr> {
        self.expect_tag(Tag::I8)?;
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, SerdeErr> {
        self.expect_tag(Tag::I16)?;
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, SerdeErr> {
        self.expect_tag(Tag::I32)?;
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, SerdeErr> {
        self.expect_tag(Tag::I64)?;
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, SerdeErr> {
        self.expect_tag(Tag::F32)?;
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, SerdeErr> {
        self.expect_tag(Tag::F64)?;
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool, SerdeErr> {
        self.expect_tag(Tag::Bool)?;
        Ok(self.read_raw_u8()? != 0)
    }

    pub fn read_str(&mut self) -> Result<&'a str, SerdeErr> {
        self.expect_tag(Tag::Str)?;
        self.read_str_payload()
    }

    fn read_str_payload(&mut self) -> Result<&'a str, SerdeErr> {
        let length = self.read_raw_u32()? as usize;
        let bytes = self.take(length)?;
        if self.read_raw_u8()? != 0 {
            return Err(SerdeErr::MissingNul);
        }
        std::str::from_utf8(bytes).map_err(|_| SerdeErr::InvalidUtf8)
    }

    pub fn read_string(&mut self) -> Result<String, SerdeErr> {
        self.read_str().map(str::to_owned)
    }

    pub fn read_bytes(&mut self) -> Result<&'a [u8], SerdeErr> {
        self.expect_tag(Tag::Bytes)?;
        let length = self.read_raw_u32()? as usize;
        self.take(length)
    }

    /// Reads either a `Bytes` value or an `Array` whose elements are all `U8`.
    pub fn read_byte_buf(&mut self) -> Result<Vec<u8>, SerdeErr> {
        match self.peek_tag()? {
            Tag::Bytes => self.read_bytes().map(<[u8]>::to_vec),
            Tag::Array => {
                self.read_array_begin()?;
                let mut output = Vec::new();
                while !self.is_end()? {
                    output.push(self.read_u8()?);
                }
                self.read_end()?;
                Ok(output)
            }
            found => Err(SerdeErr::mismatch(Tag::Bytes, found)),
        }
    }

    // Containers

    fn enter(&mut self) -> Result<(), SerdeErr> {
        if self.depth >= MAX_DEPTH {
            return Err(SerdeErr::DepthLimitExceeded {
                max_depth: MAX_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn read_array_begin(&mut self) -> Result<(), SerdeErr> {
        self.expect_tag(Tag::Array)?;
        self.enter()
    }

    pub fn read_object_begin(&mut self) -> Result<(), SerdeErr> {
        self.expect_tag(Tag::Object)?;
        self.enter()
    }

    /// True when the next tag closes the current container.
    pub fn is_end(&self) -> Result<bool, SerdeErr> {
        Ok(self.peek_tag()? == Tag::End)
    }

    pub fn read_end(&mut self) -> Result<(), SerdeErr> {
        self.expect_tag(Tag::End)?;
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    pub fn read_key(&mut self) -> Result<&'a str, SerdeErr> {
        self.read_str()
    }

    /// Advance past the next complete value, whatever its kind.
    pub fn skip_value(&mut self) -> Result<(), SerdeErr> {
        let tag = self.read_tag()?;
        match tag {
            Tag::Str => {
                self.read_str_payload()?;
            }
            Tag::Bytes => {
                let length = self.read_raw_u32()? as usize;
                self.take(length)?;
            }
            Tag::Array => {
                self.enter()?;
                while !self.is_end()? {
                    self.skip_value()?;
                }
                self.read_end()?;
            }
            Tag::Object => {
                self.enter()?;
                while !self.is_end()? {
                    self.read_key()?;
                    self.skip_value()?;
                }
                self.read_end()?;
            }
            Tag::End => {
                return Err(SerdeErr::FormatMismatch {
                    expected: "value",
                    found: Tag::End,
                })
            }
            fixed => {
                let size = fixed.fixed_size().unwrap_or(0);
                self.take(size)?;
            }
        }
        Ok(())
    }
}
