use std::fmt;

/// The one-byte kind marker that precedes every encoded value.
///
/// `End` is a sentinel: it only ever closes an `Array` or `Object` and is
/// never a standalone value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Nil = 0,
    U8 = 1,
    U16 = 2,
    U32 = 3,
    U64 = 4,
    I8 = 5,
    I16 = 6,
    I32 = 7,
    I64 = 8,
    F32 = 9,
    F64 = 10,
    Bool = 11,
    Str = 12,
    Bytes = 13,
    Array = 14,
    Object = 15,
    End = 16,
}

impl Tag {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Tag::Nil),
            1 => Some(Tag::U8),
            2 => Some(Tag::U16),
            3 => Some(Tag::U32),
            4 => Some(Tag::U64),
            5 => Some(Tag::I8),
            6 => Some(Tag::I16),
            7 => Some(Tag::I32),
            8 => Some(Tag::I64),
            9 => Some(Tag::F32),
            10 => Some(Tag::F64),
            11 => Some(Tag::Bool),
            12 => Some(Tag::Str),
            13 => Some(Tag::Bytes),
            14 => Some(Tag::Array),
            15 => Some(Tag::Object),
            16 => Some(Tag::End),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Size in bytes of the fixed payload following the tag, if the kind has one.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            Tag::Nil | Tag::End | Tag::Array | Tag::Object => Some(0),
            Tag::U8 | Tag::I8 | Tag::Bool => Some(1),
            Tag::U16 | Tag::I16 => Some(2),
            Tag::U32 | Tag::I32 | Tag::F32 => Some(4),
            Tag::U64 | Tag::I64 | Tag::F64 => Some(8),
            Tag::Str | Tag::Bytes => None,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Tag::Array | Tag::Object)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Nil => "Nil",
            Tag::U8 => "U8",
            Tag::U16 => "U16",
            Tag::U32 => "U32",
            Tag::U64 => "U64",
            Tag::I8 => "I8",
            Tag::I16 => "I16",
            Tag::I32 => "I32",
            Tag::I64 => "I64",
            Tag::F32 => "F32",
            Tag::F64 => "F64",
            Tag::Bool => "Bool",
            Tag::Str => "Str",
            Tag::Bytes => "Bytes",
            Tag::Array => "Array",
            Tag::Object => "Object",
            Tag::End => "End",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
