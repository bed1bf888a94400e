use std::collections::{BTreeMap, HashMap, VecDeque};

use axon_serde::Value;

use super::shape::{KeyKind, Shape};

/// Types that know the shape they are mapped through.
///
/// Implemented here for the primitive and container types the mapper
/// supports; records get it from `#[derive(Describe)]`.
pub trait Describe {
    fn shape() -> Shape;
}

/// Types usable as map keys. Keys travel as strings on the wire.
pub trait MapKey {
    const KIND: KeyKind;
}

macro_rules! impl_describe {
    ($($ty:ty => $shape:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    Shape::$shape
                }
            }
        )*
    };
}

impl_describe! {
    () => Nil,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => Str,
    Value => Any,
}

macro_rules! impl_map_key {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const KIND: KeyKind = KeyKind::$kind;
            }
        )*
    };
}

impl_map_key! {
    String => Str,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
}

impl<T: Describe> Describe for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }
}

impl<T: Describe> Describe for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape() -> Shape {
        Shape::fixed_array(T::shape(), N)
    }
}

impl<K: MapKey, V: Describe, S> Describe for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::map(K::KIND, V::shape())
    }
}

impl<K: MapKey, V: Describe> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::KIND, V::shape())
    }
}
