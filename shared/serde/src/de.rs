use serde::de::{
    self,
    value::{BorrowedStrDeserializer, SeqDeserializer},
    DeserializeOwned, DeserializeSeed, Deserializer as _, EnumAccess, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};

use crate::{error::SerdeErr, key::KeyDeserializer, reader::TagReader, tag::Tag};

/// Decode a single value that must span all of `bytes`.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerdeErr> {
    let mut reader = TagReader::new(bytes);
    let value = from_reader(&mut reader)?;
    if !reader.is_exhausted() {
        return Err(SerdeErr::Construction(format!(
            "{} trailing byte(s) after value",
            reader.remaining()
        )));
    }
    Ok(value)
}

/// Decode the next value from `reader`, leaving it positioned after the value.
pub fn from_reader<'de, T: de::Deserialize<'de>>(
    reader: &mut TagReader<'de>,
) -> Result<T, SerdeErr> {
    T::deserialize(&mut Deserializer::new(reader))
}

/// Reads tagged values back into the serde data model.
///
/// Typed requests are strict: asking for an `i32` when the stream holds a
/// `U32` is a [`SerdeErr::FormatMismatch`]. Object entries a struct does not
/// name are skipped, and struct fields missing from the stream are left to
/// the struct's own `#[serde(default)]` handling.
pub struct Deserializer<'r, 'de> {
    reader: &'r mut TagReader<'de>,
}

impl<'r, 'de> Deserializer<'r, 'de> {
    pub fn new(reader: &'r mut TagReader<'de>) -> Self {
        Self { reader }
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'_, 'de> {
    type Error = SerdeErr;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        match self.reader.peek_tag()? {
            Tag::Nil => {
                self.reader.read_nil()?;
                visitor.visit_unit()
            }
            Tag::U8 => visitor.visit_u8(self.reader.read_u8()?),
            Tag::U16 => visitor.visit_u16(self.reader.read_u16()?),
            Tag::U32 => visitor.visit_u32(self.reader.read_u32()?),
            Tag::U64 => visitor.visit_u64(self.reader.read_u64()?),
            Tag::I8 => visitor.visit_i8(self.reader.read_i8()?),
            Tag::I16 => visitor.visit_i16(self.reader.read_i16()?),
            Tag::I32 => visitor.visit_i32(self.reader.read_i32()?),
            Tag::I64 => visitor.visit_i64(self.reader.read_i64()?),
            Tag::F32 => visitor.visit_f32(self.reader.read_f32()?),
            Tag::F64 => visitor.visit_f64(self.reader.read_f64()?),
            Tag::Bool => visitor.visit_bool(self.reader.read_bool()?),
            Tag::Str => visitor.visit_borrowed_str(self.reader.read_str()?),
            Tag::Bytes => visitor.visit_borrowed_bytes(self.reader.read_bytes()?),
            Tag::Array => self.deserialize_seq(visitor),
            Tag::Object => self.deserialize_map(visitor),
            Tag::End => Err(SerdeErr::FormatMismatch {
                expected: "value",
                found: Tag::End,
            }),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_bool(self.reader.read_bool()?)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_i8(self.reader.read_i8()?)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_i16(self.reader.read_i16()?)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_i32(self.reader.read_i32()?)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_i64(self.reader.read_i64()?)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_u8(self.reader.read_u8()?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_u16(self.reader.read_u16()?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_u32(self.reader.read_u32()?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_u64(self.reader.read_u64()?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_f32(self.reader.read_f32()?)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_f64(self.reader.read_f64()?)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        let text = self.reader.read_str()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(only), None) => visitor.visit_char(only),
            _ => Err(SerdeErr::Construction(format!(
                "expected a single character, found {:?}",
                text
            ))),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_borrowed_str(self.reader.read_str()?)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        if self.reader.peek_tag()? == Tag::Bytes {
            visitor.visit_borrowed_bytes(self.reader.read_bytes()?)
        } else {
            visitor.visit_byte_buf(self.reader.read_byte_buf()?)
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        if self.reader.peek_tag()? == Tag::Nil {
            self.reader.read_nil()?;
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.reader.read_nil()?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        // byte blobs stand in for arrays of U8
        if self.reader.peek_tag()? == Tag::Bytes {
            let bytes = self.reader.read_bytes()?;
            return visitor.visit_seq(SeqDeserializer::<_, SerdeErr>::new(bytes.iter().copied()));
        }
        self.reader.read_array_begin()?;
        let value = visitor.visit_seq(Elements { de: &mut *self })?;
        self.reader.read_end()?;
        Ok(value)
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.reader.read_object_begin()?;
        let value = visitor.visit_map(Entries { de: &mut *self })?;
        // a visitor may stop early; anything it left is skipped
        while !self.reader.is_end()? {
            self.reader.read_key()?;
            self.reader.skip_value()?;
        }
        self.reader.read_end()?;
        Ok(value)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        match self.reader.peek_tag()? {
            Tag::Str => {
                let variant = self.reader.read_str()?;
                visitor.visit_enum(BorrowedStrDeserializer::<SerdeErr>::new(variant))
            }
            Tag::Object => {
                self.reader.read_object_begin()?;
                let value = visitor.visit_enum(Variant { de: &mut *self })?;
                self.reader.read_end()?;
                Ok(value)
            }
            found => Err(SerdeErr::FormatMismatch {
                expected: "enum variant",
                found,
            }),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        self.reader.skip_value()?;
        visitor.visit_unit()
    }
}

struct Elements<'a, 'r, 'de> {
    de: &'a mut Deserializer<'r, 'de>,
}

impl<'de> SeqAccess<'de> for Elements<'_, '_, 'de> {
    type Error = SerdeErr;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, SerdeErr> {
        if self.de.reader.is_end()? {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

struct Entries<'a, 'r, 'de> {
    de: &'a mut Deserializer<'r, 'de>,
}

impl<'de> MapAccess<'de> for Entries<'_, '_, 'de> {
    type Error = SerdeErr;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, SerdeErr> {
        if self.de.reader.is_end()? {
            return Ok(None);
        }
        let key = self.de.reader.read_key()?;
        seed.deserialize(KeyDeserializer::new(key)).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, SerdeErr> {
        seed.deserialize(&mut *self.de)
    }
}

/// A non-unit variant: a single-entry `Object` keyed by the variant name.
struct Variant<'a, 'r, 'de> {
    de: &'a mut Deserializer<'r, 'de>,
}

impl<'de> EnumAccess<'de> for Variant<'_, '_, 'de> {
    type Error = SerdeErr;
    type Variant = Self;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self), SerdeErr> {
        let name = self.de.reader.read_key()?;
        let value = seed.deserialize(BorrowedStrDeserializer::<SerdeErr>::new(name))?;
        Ok((value, self))
    }
}

impl<'de> VariantAccess<'de> for Variant<'_, '_, 'de> {
    type Error = SerdeErr;

    fn unit_variant(self) -> Result<(), SerdeErr> {
        self.de.reader.read_nil()
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, SerdeErr> {
        seed.deserialize(&mut *self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, SerdeErr> {
        de::Deserializer::deserialize_seq(&mut *self.de, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        de::Deserializer::deserialize_map(&mut *self.de, visitor)
    }
}
