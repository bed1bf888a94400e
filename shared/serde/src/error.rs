use std::fmt::Display;

use thiserror::Error;

use crate::tag::Tag;

/// Errors produced while encoding or decoding tagged values.
///
/// `FormatMismatch`, `UnexpectedEnd` and `InvalidTag` abort the value being
/// decoded. Callers reading a stream of frames treat them as fatal for the
/// current buffer only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The tag byte is valid but names a different kind than the one requested
    #[error("Expected a {expected} value but found {found}")]
    FormatMismatch { expected: &'static str, found: Tag },

    /// The buffer ran out in the middle of a value
    #[error("Unexpected end of input: needed {needed} more byte(s) but only {remaining} remain")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// The tag byte is outside the known range
    #[error("Invalid tag byte {0}. The input is not a tagged value stream")]
    InvalidTag(u8),

    /// A string payload is not valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// The byte following a string payload was not the NUL terminator
    #[error("String payload is not followed by its NUL terminator")]
    MissingNul,

    /// A string or byte payload too long for its u32 length prefix
    #[error("Payload of {len} bytes does not fit a u32 length prefix")]
    LengthOverflow { len: usize },

    /// Containers nested deeper than the reader allows
    #[error("Container nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },

    /// A native value has no mapping rule onto the wire format
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A map key kind other than a string or an integer
    #[error("Unsupported map key kind: {0}. Only strings and integers can be used as keys")]
    UnsupportedKey(String),

    /// A stringified map key could not be parsed back into its key kind
    #[error("Map key '{key}' cannot be parsed as {kind}")]
    KeyParse { key: String, kind: &'static str },

    /// The target type could not be constructed from the decoded entries
    #[error("Cannot construct value: {0}")]
    Construction(String),

    /// Custom error raised by a `Serialize`/`Deserialize` implementation
    #[error("{0}")]
    Custom(String),
}

impl SerdeErr {
    pub fn mismatch(expected: Tag, found: Tag) -> Self {
        SerdeErr::FormatMismatch {
            expected: expected.name(),
            found,
        }
    }

    /// True for errors caused by the byte stream itself rather than by the
    /// native types involved.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SerdeErr::FormatMismatch { .. }
                | SerdeErr::UnexpectedEnd { .. }
                | SerdeErr::InvalidTag(_)
                | SerdeErr::InvalidUtf8
                | SerdeErr::MissingNul
                | SerdeErr::DepthLimitExceeded { .. }
        )
    }
}

impl serde::ser::Error for SerdeErr {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeErr::Custom(msg.to_string())
    }
}

impl serde::de::Error for SerdeErr {
    fn custom<T: Display>(msg: T) -> Self {
        SerdeErr::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        SerdeErr::Construction(format!("missing field `{field}`"))
    }
}
