use serde::{de::DeserializeOwned, Serialize};

use crate::schema::{Describe, Shape};

/// A type that travels on the wire under a fixed numeric type id.
///
/// Usually derived together with `Describe` and serde:
///
/// ```ignore
/// #[derive(Describe, Variant, Serialize, Deserialize, Default)]
/// #[type_id = 1000]
/// pub struct Position {
///     pub x: f32,
///     pub y: f32,
///     pub z: f32,
/// }
/// ```
pub trait Variant: Describe + Serialize + DeserializeOwned + 'static {
    const TYPE_ID: u32;

    fn variant_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn variant_shape() -> Shape {
        Self::shape()
    }
}

/// Hash a type path into a type id: `h = 5381; h = h * 33 + byte`, wrapping.
///
/// Used by `#[derive(Variant)]` when no `#[type_id = N]` is given. Both ends
/// must derive ids from the same full path.
pub const fn type_id_from_name(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 5381;
    let mut index = 0;
    while index < bytes.len() {
        hash = hash.wrapping_mul(33).wrapping_add(bytes[index] as u32);
        index += 1;
    }
    hash
}
