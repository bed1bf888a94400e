use axon_serde::{from_bytes, to_bytes, Tag, TagReader, TagWriter, Value};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    describe::Describe,
    error::MapperError,
    shape::{Descriptor, KeyKind, Shape},
};

/// Walks a `Shape` to encode and decode values through the tagged codec.
///
/// Values travel as dynamic [`Value`] trees; [`Mapper::encode_as`] and
/// [`Mapper::decode_as`] bridge native types through their serde
/// implementations.
pub struct Mapper;

impl Mapper {
    // Encoding

    /// Write `value` as `shape`.
    ///
    /// On error the writer is cut back to its length before the call.
    pub fn encode(value: &Value, shape: &Shape, writer: &mut TagWriter) -> Result<(), MapperError> {
        let start = writer.len();
        let result = Self::write_shape(value, shape, writer);
        if result.is_err() {
            writer.truncate(start);
        }
        result
    }

    /// Encode into a fresh buffer.
    pub fn encode_to_vec(value: &Value, shape: &Shape) -> Result<Vec<u8>, MapperError> {
        let mut writer = TagWriter::new();
        Self::encode(value, shape, &mut writer)?;
        Ok(writer.to_bytes())
    }

    /// Encode a native value through its `Describe` shape.
    pub fn encode_as<T: Describe + Serialize>(value: &T, writer: &mut TagWriter) -> Result<(), MapperError> {
        let dynamic = Value::from_bytes(&to_bytes(value)?)?;
        Self::encode(&dynamic, &T::shape(), writer)
    }

    fn write_shape(value: &Value, shape: &Shape, writer: &mut TagWriter) -> Result<(), MapperError> {
        match shape {
            Shape::Nil => match value {
                Value::Nil => writer.write_nil(),
                other => return Err(mismatch(shape, other)),
            },
            Shape::U8 => writer.write_u8(integer(value, shape)?),
            Shape::U16 => writer.write_u16(integer(value, shape)?),
            Shape::U32 => writer.write_u32(integer(value, shape)?),
            Shape::U64 => writer.write_u64(integer(value, shape)?),
            Shape::I8 => writer.write_i8(integer(value, shape)?),
            Shape::I16 => writer.write_i16(integer(value, shape)?),
            Shape::I32 => writer.write_i32(integer(value, shape)?),
            Shape::I64 => writer.write_i64(integer(value, shape)?),
            Shape::F32 => match *value {
                Value::F32(v) => writer.write_f32(v),
                Value::F64(v) => writer.write_f32(v as f32),
                ref other => return Err(mismatch(shape, other)),
            },
            Shape::F64 => match value.as_f64() {
                Some(v) => writer.write_f64(v),
                None => return Err(mismatch(shape, value)),
            },
            Shape::Bool => match *value {
                Value::Bool(v) => writer.write_bool(v),
                ref other => return Err(mismatch(shape, other)),
            },
            Shape::Str => match value {
                Value::Str(text) => writer.write_str(text)?,
                other => return Err(mismatch(shape, other)),
            },
            Shape::Bytes => writer.write_bytes(&byte_blob(value, shape)?)?,
            Shape::Optional(inner) => match value {
                Value::Nil => writer.write_nil(),
                present => Self::write_shape(present, inner, writer)?,
            },
            Shape::Array(_) | Shape::FixedArray(..) if shape.is_byte_like() => {
                let blob = byte_blob(value, shape)?;
                check_len(shape, blob.len())?;
                writer.write_bytes(&blob)?
            }
            Shape::Array(inner) | Shape::FixedArray(inner, _) => {
                let Value::Array(items) = value else {
                    return Err(mismatch(shape, value));
                };
                check_len(shape, items.len())?;
                writer.begin_array();
                for item in items {
                    Self::write_shape(item, inner, writer)?;
                }
                writer.end_array();
            }
            Shape::Map(key_kind, inner) => {
                let Value::Object(entries) = value else {
                    return Err(mismatch(shape, value));
                };
                writer.begin_object();
                for (key, entry) in entries {
                    check_key(*key_kind, key)?;
                    writer.write_key(key)?;
                    Self::write_shape(entry, inner, writer)?;
                }
                writer.end_object();
            }
            Shape::Record(descriptor) => Self::write_record(value, descriptor, writer)?,
            Shape::Any => value.write(writer)?,
        }
        Ok(())
    }

    fn write_record(value: &Value, descriptor: &Descriptor, writer: &mut TagWriter) -> Result<(), MapperError> {
        let Value::Object(entries) = value else {
            return Err(MapperError::unsupported(descriptor.name(), value.tag()));
        };
        if let Some((unknown, _)) = entries.iter().find(|(key, _)| descriptor.field(key).is_none()) {
            return Err(MapperError::UnknownField {
                record: descriptor.name().to_owned(),
                field: unknown.clone(),
            });
        }

        writer.begin_object();
        for field in descriptor.fields() {
            match value.get(&field.name) {
                Some(field_value) => {
                    writer.write_key(&field.name)?;
                    Self::write_shape(field_value, &field.shape, writer)?;
                }
                None if field.required => {
                    return Err(MapperError::Construction {
                        record: descriptor.name().to_owned(),
                        field: field.name.clone(),
                    });
                }
                // the reader fills in the default
                None => {}
            }
        }
        writer.end_object();
        Ok(())
    }

    // Decoding

    /// Read the next value as `shape`.
    pub fn decode(reader: &mut TagReader, shape: &Shape) -> Result<Value, MapperError> {
        let value = match shape {
            Shape::Nil => {
                reader.read_nil()?;
                Value::Nil
            }
            Shape::U8 => Value::U8(reader.read_u8()?),
            Shape::U16 => Value::U16(reader.read_u16()?),
            Shape::U32 => Value::U32(reader.read_u32()?),
            Shape::U64 => Value::U64(reader.read_u64()?),
            Shape::I8 => Value::I8(reader.read_i8()?),
            Shape::I16 => Value::I16(reader.read_i16()?),
            Shape::I32 => Value::I32(reader.read_i32()?),
            Shape::I64 => Value::I64(reader.read_i64()?),
            Shape::F32 => Value::F32(reader.read_f32()?),
            Shape::F64 => Value::F64(reader.read_f64()?),
            Shape::Bool => Value::Bool(reader.read_bool()?),
            Shape::Str => Value::Str(reader.read_string()?),
            Shape::Bytes => Value::Bytes(reader.read_byte_buf()?),
            Shape::Optional(inner) => {
                if reader.peek_tag()? == Tag::Nil {
                    reader.read_nil()?;
                    Value::Nil
                } else {
                    Self::decode(reader, inner)?
                }
            }
            Shape::Array(_) | Shape::FixedArray(..) if shape.is_byte_like() => {
                let bytes = reader.read_byte_buf()?;
                check_len(shape, bytes.len())?;
                Value::Bytes(bytes)
            }
            Shape::Array(inner) | Shape::FixedArray(inner, _) => {
                reader.read_array_begin()?;
                let mut items = Vec::new();
                while !reader.is_end()? {
                    items.push(Self::decode(reader, inner)?);
                }
                reader.read_end()?;
                check_len(shape, items.len())?;
                Value::Array(items)
            }
            Shape::Map(key_kind, inner) => {
                reader.read_object_begin()?;
                let mut entries = Vec::new();
                while !reader.is_end()? {
                    let key = reader.read_key()?;
                    check_key(*key_kind, key)?;
                    entries.push((key.to_owned(), Self::decode(reader, inner)?));
                }
                reader.read_end()?;
                Value::Object(entries)
            }
            Shape::Record(descriptor) => Self::read_record(reader, descriptor)?,
            Shape::Any => reader.read_value()?,
        };
        Ok(value)
    }

    fn read_record(reader: &mut TagReader, descriptor: &Descriptor) -> Result<Value, MapperError> {
        reader.read_object_begin()?;
        let mut found: Vec<Option<Value>> = vec![None; descriptor.fields().len()];
        while !reader.is_end()? {
            let key = reader.read_key()?;
            match descriptor.fields().iter().position(|field| field.name == key) {
                Some(index) => {
                    let shape = &descriptor.fields()[index].shape;
                    found[index] = Some(Self::decode(reader, shape)?);
                }
                None => reader.skip_value()?,
            }
        }
        reader.read_end()?;

        let mut entries = Vec::with_capacity(found.len());
        for (field, value) in descriptor.fields().iter().zip(found) {
            let value = match value {
                Some(value) => value,
                None if field.required => {
                    return Err(MapperError::Construction {
                        record: descriptor.name().to_owned(),
                        field: field.name.clone(),
                    });
                }
                None => field.shape.default_value(),
            };
            entries.push((field.name.clone(), value));
        }
        Ok(Value::Object(entries))
    }

    /// Decode a value that must span all of `bytes`.
    pub fn decode_from_slice(bytes: &[u8], shape: &Shape) -> Result<Value, MapperError> {
        let mut reader = TagReader::new(bytes);
        let value = Self::decode(&mut reader, shape)?;
        if !reader.is_exhausted() {
            return Err(axon_serde::SerdeErr::Construction(format!(
                "{} trailing byte(s) after {}",
                reader.remaining(),
                shape
            ))
            .into());
        }
        Ok(value)
    }

    /// Decode a native value through its `Describe` shape.
    pub fn decode_as<T: Describe + DeserializeOwned>(bytes: &[u8]) -> Result<T, MapperError> {
        let dynamic = Self::decode_from_slice(bytes, &T::shape())?;
        Ok(from_bytes(&dynamic.to_bytes()?)?)
    }
}

fn mismatch(shape: &Shape, value: &Value) -> MapperError {
    MapperError::unsupported(shape, value.tag())
}

fn integer<T: TryFrom<i128>>(value: &Value, shape: &Shape) -> Result<T, MapperError> {
    value
        .as_integer()
        .and_then(|wide| T::try_from(wide).ok())
        .ok_or_else(|| mismatch(shape, value))
}

fn byte_blob(value: &Value, shape: &Shape) -> Result<Vec<u8>, MapperError> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| integer::<u8>(item, &Shape::U8))
            .collect(),
        other => Err(mismatch(shape, other)),
    }
}

fn check_len(shape: &Shape, found: usize) -> Result<(), MapperError> {
    match shape {
        Shape::FixedArray(_, expected) if *expected != found => Err(MapperError::LengthMismatch {
            shape: shape.name(),
            expected: *expected,
            found,
        }),
        _ => Ok(()),
    }
}

fn check_key(kind: KeyKind, key: &str) -> Result<(), MapperError> {
    if kind.accepts(key) {
        Ok(())
    } else {
        Err(axon_serde::SerdeErr::KeyParse {
            key: key.to_owned(),
            kind: kind.name(),
        }
        .into())
    }
}
