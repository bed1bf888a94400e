//! Map keys travel as strings. Strings pass through unchanged, integer keys
//! are written in decimal and parsed back on the way in. Any other key kind
//! is rejected.

use serde::{
    de::{self, IntoDeserializer, Visitor},
    ser::{self, Impossible, Serialize},
};

use crate::error::SerdeErr;

pub(crate) struct KeySerializer;

fn unsupported(kind: &str) -> SerdeErr {
    SerdeErr::UnsupportedKey(kind.to_owned())
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = SerdeErr;

    type SerializeSeq = Impossible<String, SerdeErr>;
    type SerializeTuple = Impossible<String, SerdeErr>;
    type SerializeTupleStruct = Impossible<String, SerdeErr>;
    type SerializeTupleVariant = Impossible<String, SerdeErr>;
    type SerializeMap = Impossible<String, SerdeErr>;
    type SerializeStruct = Impossible<String, SerdeErr>;
    type SerializeStructVariant = Impossible<String, SerdeErr>;

    fn serialize_str(self, v: &str) -> Result<String, SerdeErr> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, SerdeErr> {
        Ok(v.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, SerdeErr> {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, SerdeErr> {
        Ok(variant.to_owned())
    }

    fn serialize_bool(self, _v: bool) -> Result<String, SerdeErr> {
        Err(unsupported("bool"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String, SerdeErr> {
        Err(unsupported("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, SerdeErr> {
        Err(unsupported("f64"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, SerdeErr> {
        Err(unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<String, SerdeErr> {
        Err(unsupported("option"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String, SerdeErr> {
        Err(unsupported("option"))
    }

    fn serialize_unit(self) -> Result<String, SerdeErr> {
        Err(unsupported("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String, SerdeErr> {
        Err(unsupported(name))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, SerdeErr> {
        Err(unsupported(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerdeErr> {
        Err(unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, SerdeErr> {
        Err(unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, SerdeErr> {
        Err(unsupported(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, SerdeErr> {
        Err(unsupported(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerdeErr> {
        Err(unsupported("map"))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, SerdeErr> {
        Err(unsupported(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, SerdeErr> {
        Err(unsupported(name))
    }
}

/// Hands a decoded key string to whatever key type the visitor asks for.
pub(crate) struct KeyDeserializer<'a> {
    key: &'a str,
}

impl<'a> KeyDeserializer<'a> {
    pub(crate) fn new(key: &'a str) -> Self {
        Self { key }
    }

    fn parse<T: std::str::FromStr>(&self, kind: &'static str) -> Result<T, SerdeErr> {
        self.key.parse().map_err(|_| SerdeErr::KeyParse {
            key: self.key.to_owned(),
            kind,
        })
    }
}

macro_rules! parse_key {
    ($method:ident, $visit:ident, $ty:ty) => {
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
            visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
        }
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = SerdeErr;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, SerdeErr> {
        visitor.visit_borrowed_str(self.key)
    }

    parse_key!(deserialize_i8, visit_i8, i8);
    parse_key!(deserialize_i16, visit_i16, i16);
    parse_key!(deserialize_i32, visit_i32, i32);
    parse_key!(deserialize_i64, visit_i64, i64);
    parse_key!(deserialize_u8, visit_u8, u8);
    parse_key!(deserialize_u16, visit_u16, u16);
    parse_key!(deserialize_u32, visit_u32, u32);
    parse_key!(deserialize_u64, visit_u64, u64);
    parse_key!(deserialize_char, visit_char, char);

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, SerdeErr> {
        visitor.visit_enum(self.key.into_deserializer())
    }

    serde::forward_to_deserialize_any! {
        bool f32 f64 str string bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
