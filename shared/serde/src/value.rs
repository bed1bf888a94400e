use std::fmt;

use serde::{
    de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{de::from_bytes, error::SerdeErr, reader::TagReader, tag::Tag, writer::TagWriter};

/// A decoded tagged value held in memory, for schema-less use.
///
/// `Object` keeps its entries in wire order; duplicate keys are kept as read.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Nil => Tag::Nil,
            Value::U8(_) => Tag::U8,
            Value::U16(_) => Tag::U16,
            Value::U32(_) => Tag::U32,
            Value::U64(_) => Tag::U64,
            Value::I8(_) => Tag::I8,
            Value::I16(_) => Tag::I16,
            Value::I32(_) => Tag::I32,
            Value::I64(_) => Tag::I64,
            Value::F32(_) => Tag::F32,
            Value::F64(_) => Tag::F64,
            Value::Bool(_) => Tag::Bool,
            Value::Str(_) => Tag::Str,
            Value::Bytes(_) => Tag::Bytes,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Look up an `Object` entry by key. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Widen any integer kind to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => Some(v.into()),
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn write(&self, writer: &mut TagWriter) -> Result<(), SerdeErr> {
        match self {
            Value::Nil => writer.write_nil(),
            Value::U8(v) => writer.write_u8(*v),
            Value::U16(v) => writer.write_u16(*v),
            Value::U32(v) => writer.write_u32(*v),
            Value::U64(v) => writer.write_u64(*v),
            Value::I8(v) => writer.write_i8(*v),
            Value::I16(v) => writer.write_i16(*v),
            Value::I32(v) => writer.write_i32(*v),
            Value::I64(v) => writer.write_i64(*v),
            Value::F32(v) => writer.write_f32(*v),
            Value::F64(v) => writer.write_f64(*v),
            Value::Bool(v) => writer.write_bool(*v),
            Value::Str(v) => writer.write_str(v)?,
            Value::Bytes(v) => writer.write_bytes(v)?,
            Value::Array(items) => {
                writer.begin_array();
                for item in items {
                    item.write(writer)?;
                }
                writer.end_array();
            }
            Value::Object(entries) => {
                writer.begin_object();
                for (key, value) in entries {
                    writer.write_key(key)?;
                    value.write(writer)?;
                }
                writer.end_object();
            }
        }
        Ok(())
    }

    /// Read the next value without any schema, recursing into containers.
    pub fn read(reader: &mut TagReader) -> Result<Self, SerdeErr> {
        let value = match reader.peek_tag()? {
            Tag::Nil => {
                reader.read_nil()?;
                Value::Nil
            }
            Tag::U8 => Value::U8(reader.read_u8()?),
            Tag::U16 => Value::U16(reader.read_u16()?),
            Tag::U32 => Value::U32(reader.read_u32()?),
            Tag::U64 => Value::U64(reader.read_u64()?),
            Tag::I8 => Value::I8(reader.read_i8()?),
            Tag::I16 => Value::I16(reader.read_i16()?),
            Tag::I32 => Value::I32(reader.read_i32()?),
            Tag::I64 => Value::I64(reader.read_i64()?),
            Tag::F32 => Value::F32(reader.read_f32()?),
            Tag::F64 => Value::F64(reader.read_f64()?),
            Tag::Bool => Value::Bool(reader.read_bool()?),
            Tag::Str => Value::Str(reader.read_string()?),
            Tag::Bytes => Value::Bytes(reader.read_bytes()?.to_vec()),
            Tag::Array => {
                reader.read_array_begin()?;
                let mut items = Vec::new();
                while !reader.is_end()? {
                    items.push(Value::read(reader)?);
                }
                reader.read_end()?;
                Value::Array(items)
            }
            Tag::Object => {
                reader.read_object_begin()?;
                let mut entries = Vec::new();
                while !reader.is_end()? {
                    let key = reader.read_key()?.to_owned();
                    let value = Value::read(reader)?;
                    entries.push((key, value));
                }
                reader.read_end()?;
                Value::Object(entries)
            }
            Tag::End => {
                return Err(SerdeErr::FormatMismatch {
                    expected: "value",
                    found: Tag::End,
                })
            }
        };
        Ok(value)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SerdeErr> {
        let mut writer = TagWriter::new();
        self.write(&mut writer)?;
        Ok(writer.to_bytes())
    }

    /// Decode a single value that must span all of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        let mut reader = TagReader::new(bytes);
        let value = Value::read(&mut reader)?;
        if !reader.is_exhausted() {
            return Err(SerdeErr::Construction(format!(
                "{} trailing byte(s) after value",
                reader.remaining()
            )));
        }
        Ok(value)
    }

    /// Convert into a native type through its `Deserialize` implementation.
    pub fn decode_as<T: DeserializeOwned>(&self) -> Result<T, SerdeErr> {
        from_bytes(&self.to_bytes()?)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_bytes(v),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any tagged value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_u8<E: de::Error>(self, v: u8) -> Result<Value, E> {
        Ok(Value::U8(v))
    }

    fn visit_u16<E: de::Error>(self, v: u16) -> Result<Value, E> {
        Ok(Value::U16(v))
    }

    fn visit_u32<E: de::Error>(self, v: u32) -> Result<Value, E> {
        Ok(Value::U32(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::U64(v))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<Value, E> {
        Ok(Value::I8(v))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<Value, E> {
        Ok(Value::I16(v))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<Value, E> {
        Ok(Value::I32(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<Value, E> {
        Ok(Value::F32(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Value, E> {
        Ok(Value::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(Value::Object(entries))
    }
}

impl TagReader<'_> {
    /// Schema-less read of the next value.
    pub fn read_value(&mut self) -> Result<Value, SerdeErr> {
        Value::read(self)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::U8(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U16(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::I8(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::I16(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
