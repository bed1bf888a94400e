use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
};

use crate::{error::SerdeErr, writer::TagWriter};

/// Encode any `Serialize` value into a fresh buffer.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerdeErr> {
    let mut writer = TagWriter::new();
    to_writer(&mut writer, value)?;
    Ok(writer.to_bytes())
}

/// Encode any `Serialize` value onto the end of `writer`.
///
/// On error the writer is cut back to its length before the call, so a
/// failed encode never leaves a half-written value behind.
pub fn to_writer<T: Serialize + ?Sized>(writer: &mut TagWriter, value: &T) -> Result<(), SerdeErr> {
    let start = writer.len();
    let result = value.serialize(&mut Serializer { writer: &mut *writer });
    if result.is_err() {
        writer.truncate(start);
    }
    result
}

/// Maps the serde data model onto tagged values.
///
/// * structs and maps become `Object`s, sequences and tuples `Array`s
/// * `None`, `()` and unit structs become `Nil`
/// * unit enum variants become their name as a `Str`; every other variant is
///   a single-entry `Object` keyed by the variant name
pub struct Serializer<'w> {
    writer: &'w mut TagWriter,
}

impl<'w> Serializer<'w> {
    pub fn new(writer: &'w mut TagWriter) -> Self {
        Self { writer }
    }
}

impl<'a, 'w> ser::Serializer for &'a mut Serializer<'w> {
    type Ok = ();
    type Error = SerdeErr;

    type SerializeSeq = Compound<'a, 'w>;
    type SerializeTuple = Compound<'a, 'w>;
    type SerializeTupleStruct = Compound<'a, 'w>;
    type SerializeTupleVariant = Compound<'a, 'w>;
    type SerializeMap = Compound<'a, 'w>;
    type SerializeStruct = Compound<'a, 'w>;
    type SerializeStructVariant = Compound<'a, 'w>;

    fn serialize_bool(self, v: bool) -> Result<(), SerdeErr> {
        self.writer.write_bool(v);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<(), SerdeErr> {
        self.writer.write_i8(v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<(), SerdeErr> {
        self.writer.write_i16(v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<(), SerdeErr> {
        self.writer.write_i32(v);
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<(), SerdeErr> {
        self.writer.write_i64(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<(), SerdeErr> {
        self.writer.write_u8(v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<(), SerdeErr> {
        self.writer.write_u16(v);
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<(), SerdeErr> {
        self.writer.write_u32(v);
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<(), SerdeErr> {
        self.writer.write_u64(v);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), SerdeErr> {
        self.writer.write_f32(v);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<(), SerdeErr> {
        self.writer.write_f64(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<(), SerdeErr> {
        let mut buffer = [0u8; 4];
        self.writer.write_str(v.encode_utf8(&mut buffer))
    }

    fn serialize_str(self, v: &str) -> Result<(), SerdeErr> {
        self.writer.write_str(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), SerdeErr> {
        self.writer.write_bytes(v)
    }

    fn serialize_none(self) -> Result<(), SerdeErr> {
        self.writer.write_nil();
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), SerdeErr> {
        self.writer.write_nil();
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), SerdeErr> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), SerdeErr> {
        self.writer.write_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), SerdeErr> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), SerdeErr> {
        self.writer.begin_object();
        self.writer.write_key(variant)?;
        value.serialize(&mut *self)?;
        self.writer.end_object();
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerdeErr> {
        self.writer.begin_array();
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, SerdeErr> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, SerdeErr> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, SerdeErr> {
        self.writer.begin_object();
        self.writer.write_key(variant)?;
        self.writer.begin_array();
        Ok(Compound::new(self, true))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerdeErr> {
        self.writer.begin_object();
        Ok(Compound::new(self, false))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, SerdeErr> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, SerdeErr> {
        self.writer.begin_object();
        self.writer.write_key(variant)?;
        self.writer.begin_object();
        Ok(Compound::new(self, true))
    }
}

/// Serializer state for every container kind. `variant` containers are
/// wrapped in an outer single-entry `Object` that must be closed too.
pub struct Compound<'a, 'w> {
    ser: &'a mut Serializer<'w>,
    variant: bool,
}

impl<'a, 'w> Compound<'a, 'w> {
    fn new(ser: &'a mut Serializer<'w>, variant: bool) -> Self {
        Self { ser, variant }
    }

    fn finish(self) -> Result<(), SerdeErr> {
        self.ser.writer.end_array();
        if self.variant {
            self.ser.writer.end_object();
        }
        Ok(())
    }
}

impl SerializeSeq for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}

impl SerializeTuple for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}

impl SerializeTupleStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}

impl SerializeTupleVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}

impl SerializeMap for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), SerdeErr> {
        let key = key.serialize(crate::key::KeySerializer)?;
        self.ser.writer.write_key(&key)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerdeErr> {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        // objects and arrays share the End tag
        self.finish()
    }
}

impl SerializeStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerdeErr> {
        self.ser.writer.write_key(key)?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}

impl SerializeStructVariant for Compound<'_, '_> {
    type Ok = ();
    type Error = SerdeErr;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerdeErr> {
        self.ser.writer.write_key(key)?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<(), SerdeErr> {
        self.finish()
    }
}
