//! # Axon Shared
//! Record schemas, the variant/type registry, component slots and the action
//! frame format used by axon clients.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

extern crate self as axon_shared;

pub use axon_derive::{Describe, Variant};
pub use axon_serde::{
    from_bytes, to_bytes, SerdeErr, Tag, TagReader, TagWriter, Value, MAX_DEPTH,
};

mod frames;
mod protocol;
mod schema;
mod world;

pub use frames::{ActionKind, Frame, FrameError, FrameReader, FrameWriter, FRAME_HEADER_SIZE};
pub use protocol::{
    type_id_from_name, RegistryError, RegistryPlugin, Template, TypeRegistry, Variant,
    VariantEntry,
};
pub use schema::{
    Describe, Descriptor, FieldDescriptor, KeyKind, MapKey, Mapper, MapperError, Shape,
};
pub use world::component::{
    component::{AsAny, Component},
    error::SlotError,
    kind::ComponentKind,
    slot_cache::SlotCache,
    slots::{ComponentSlots, PreparedWrite, SlotBinding, SlotTable},
};
