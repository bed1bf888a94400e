mod describe;
mod error;
mod mapper;
mod shape;

pub use describe::{Describe, MapKey};
pub use error::MapperError;
pub use mapper::Mapper;
pub use shape::{Descriptor, FieldDescriptor, KeyKind, Shape};
