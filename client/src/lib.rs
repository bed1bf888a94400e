//! # Axon Client
//! Applies a server-ordered stream of spawn, despawn, change and invoke
//! frames to a local set of live entities, and batches outbound invokes for
//! the transport.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use axon_shared::{
    Component, Describe, Descriptor, RegistryPlugin, Shape, SlotTable, Template, TypeRegistry,
    Value, Variant,
};

mod client;
mod client_config;
mod engine;
mod error;
mod transport;
mod world;

pub use client::Client;
pub use client_config::ClientConfig;
pub use engine::{OutboundBuffer, ReplicationEngine};
pub use error::EngineError;
pub use transport::{Transport, TransportError};
pub use world::{entity::Entity, entity_event::EntityEvent};
