pub mod component;
pub mod error;
pub mod kind;
pub mod slot_cache;
pub mod slots;
