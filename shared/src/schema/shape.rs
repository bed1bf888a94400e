use std::fmt;

use axon_serde::Value;

/// The wire layout a value is mapped through.
///
/// Shapes are plain data, built once per type (usually by
/// `#[derive(Describe)]`) and compared structurally when the registry checks
/// a re-registration for conflicts.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Nil,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Str,
    Bytes,
    /// Written as `Nil` when absent
    Optional(Box<Shape>),
    /// `Array(U8)` is written as `Bytes`
    Array(Box<Shape>),
    /// An array of exactly `len` elements, written like `Array`
    FixedArray(Box<Shape>, usize),
    Map(KeyKind, Box<Shape>),
    Record(Descriptor),
    /// Any tagged value, decoded without a schema
    Any,
}

impl Shape {
    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn array(inner: Shape) -> Self {
        Shape::Array(Box::new(inner))
    }

    pub fn fixed_array(inner: Shape, len: usize) -> Self {
        Shape::FixedArray(Box::new(inner), len)
    }

    pub fn map(key: KeyKind, value: Shape) -> Self {
        Shape::Map(key, Box::new(value))
    }

    /// True for shapes that are written as a `Bytes` value.
    pub fn is_byte_like(&self) -> bool {
        match self {
            Shape::Bytes => true,
            Shape::Array(inner) | Shape::FixedArray(inner, _) => **inner == Shape::U8,
            _ => false,
        }
    }

    /// Short human-readable name, used in errors and logs.
    pub fn name(&self) -> String {
        match self {
            Shape::Optional(inner) => format!("Optional<{}>", inner.name()),
            Shape::Array(inner) => format!("Array<{}>", inner.name()),
            Shape::FixedArray(inner, len) => format!("[{}; {}]", inner.name(), len),
            Shape::Map(key, value) => format!("Map<{}, {}>", key.name(), value.name()),
            Shape::Record(descriptor) => descriptor.name().to_owned(),
            other => format!("{:?}", other),
        }
    }

    /// The value a missing, non-required field decodes to.
    pub fn default_value(&self) -> Value {
        match self {
            Shape::Nil | Shape::Optional(_) | Shape::Any => Value::Nil,
            Shape::U8 => Value::U8(0),
            Shape::U16 => Value::U16(0),
            Shape::U32 => Value::U32(0),
            Shape::U64 => Value::U64(0),
            Shape::I8 => Value::I8(0),
            Shape::I16 => Value::I16(0),
            Shape::I32 => Value::I32(0),
            Shape::I64 => Value::I64(0),
            Shape::F32 => Value::F32(0.0),
            Shape::F64 => Value::F64(0.0),
            Shape::Bool => Value::Bool(false),
            Shape::Str => Value::Str(String::new()),
            Shape::Bytes => Value::Bytes(Vec::new()),
            Shape::Array(inner) if **inner == Shape::U8 => Value::Bytes(Vec::new()),
            Shape::Array(_) => Value::Array(Vec::new()),
            Shape::FixedArray(inner, len) if **inner == Shape::U8 => Value::Bytes(vec![0; *len]),
            Shape::FixedArray(inner, len) => Value::Array(vec![inner.default_value(); *len]),
            Shape::Map(_, _) => Value::Object(Vec::new()),
            Shape::Record(descriptor) => Value::Object(
                descriptor
                    .fields()
                    .iter()
                    .map(|field| (field.name.clone(), field.shape.default_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Descriptor> for Shape {
    fn from(descriptor: Descriptor) -> Self {
        Shape::Record(descriptor)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Map key kinds that survive the round trip through a string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Str,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
}

impl KeyKind {
    pub fn name(self) -> &'static str {
        match self {
            KeyKind::Str => "string",
            KeyKind::U8 => "u8",
            KeyKind::U16 => "u16",
            KeyKind::U32 => "u32",
            KeyKind::U64 => "u64",
            KeyKind::I8 => "i8",
            KeyKind::I16 => "i16",
            KeyKind::I32 => "i32",
            KeyKind::I64 => "i64",
        }
    }

    /// Whether `key` parses as this kind.
    pub fn accepts(self, key: &str) -> bool {
        match self {
            KeyKind::Str => true,
            KeyKind::U8 => key.parse::<u8>().is_ok(),
            KeyKind::U16 => key.parse::<u16>().is_ok(),
            KeyKind::U32 => key.parse::<u32>().is_ok(),
            KeyKind::U64 => key.parse::<u64>().is_ok(),
            KeyKind::I8 => key.parse::<i8>().is_ok(),
            KeyKind::I16 => key.parse::<i16>().is_ok(),
            KeyKind::I32 => key.parse::<i32>().is_ok(),
            KeyKind::I64 => key.parse::<i64>().is_ok(),
        }
    }
}

/// One named field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: Shape,
    /// Decoding fails when a required field is absent, instead of filling in
    /// the shape's default.
    pub required: bool,
}

/// Describes a record type: its name and its fields.
///
/// Field order is the order fields are written in. Decoding does not depend
/// on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Descriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, shape: Shape) -> Self {
        self.push_field(name, shape, false);
        self
    }

    pub fn with_required_field(mut self, name: &str, shape: Shape) -> Self {
        self.push_field(name, shape, true);
        self
    }

    fn push_field(&mut self, name: &str, shape: Shape, required: bool) {
        let field = FieldDescriptor {
            name: name.to_owned(),
            shape,
            required,
        };
        // a repeated name replaces the earlier declaration in place
        match self.fields.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}
