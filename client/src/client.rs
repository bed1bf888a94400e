use axon_shared::{TypeRegistry, Value, Variant};
use log::{info, warn};

use crate::{
    client_config::ClientConfig, engine::ReplicationEngine, error::EngineError,
    transport::Transport, world::entity_event::EntityEvent,
};

/// Drives a `ReplicationEngine` from a transport, one tick at a time.
pub struct Client {
    engine: ReplicationEngine,
    connected: bool,
}

impl Client {
    /// Create a new client. Takes ownership of the registry and locks it.
    pub fn new(config: ClientConfig, registry: TypeRegistry) -> Self {
        Self {
            engine: ReplicationEngine::new(config, registry),
            connected: false,
        }
    }

    /// Start a new session. Entities from an earlier session are dropped.
    pub fn connect(&mut self) {
        let removed = self.engine.reset();
        info!("Client connected, {} stale entit(ies) removed", removed);
        self.connected = true;
    }

    /// End the session: all live entities and queued invokes are dropped.
    pub fn disconnect(&mut self) {
        let removed = self.engine.reset();
        self.engine.clear_outbound();
        info!("Client disconnected, {} entit(ies) removed", removed);
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Run one tick: flush queued invokes, then apply every inbound buffer
    /// the transport has ready.
    ///
    /// A failed send keeps the outbound bytes for the next tick.
    pub fn update<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Vec<EntityEvent> {
        if transport.is_connected() {
            if let Err(err) = self.engine.drain_into(transport) {
                warn!(
                    "Keeping {} outbound byte(s) for the next tick: {}{}",
                    self.engine.outbound().len(),
                    err,
                    transport
                        .last_error()
                        .map(|detail| format!(" ({})", detail))
                        .unwrap_or_default()
                );
            }
        }

        let mut events = Vec::new();
        while let Some(buffer) = transport.receive() {
            events.extend(self.engine.receive(&buffer));
        }
        events
    }

    pub fn invoke<V: Variant>(&mut self, value: &V) -> Result<(), EngineError> {
        self.engine.invoke(value)
    }

    pub fn invoke_value(&mut self, type_id: u32, value: &Value) -> Result<(), EngineError> {
        self.engine.invoke_value(type_id, value)
    }

    pub fn engine(&self) -> &ReplicationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReplicationEngine {
        &mut self.engine
    }
}
