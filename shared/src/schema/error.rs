use axon_serde::SerdeErr;
use thiserror::Error;

/// Errors raised while mapping values through a `Shape`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    /// The byte stream itself could not be read or written
    #[error(transparent)]
    Serde(#[from] SerdeErr),

    /// A value's runtime kind has no mapping onto the target shape
    #[error("Unsupported shape: cannot map a {found} value as {expected}")]
    UnsupportedShape { expected: String, found: String },

    /// A fixed-length array with the wrong number of elements
    #[error("Expected {expected} element(s) for {shape} but found {found}")]
    LengthMismatch { shape: String, expected: usize, found: usize },

    /// A required field is missing, so the record cannot be constructed
    #[error("Cannot construct record '{record}': required field '{field}' is missing")]
    Construction { record: String, field: String },

    /// An encoded record carried a field its descriptor does not declare
    #[error("Record '{record}' has no field named '{field}'")]
    UnknownField { record: String, field: String },
}

impl MapperError {
    pub(crate) fn unsupported(expected: impl ToString, found: impl ToString) -> Self {
        MapperError::UnsupportedShape {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// True when the error came from malformed input bytes.
    pub fn is_format_error(&self) -> bool {
        matches!(self, MapperError::Serde(err) if err.is_format_error())
    }
}
