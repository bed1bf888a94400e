pub mod entity;
pub mod entity_event;
