use std::collections::HashMap;

use axon_shared::{
    ActionKind, AsAny, Frame, FrameReader, Mapper, MapperError, PreparedWrite, TagWriter,
    TypeRegistry, Value, Variant,
};
use log::{debug, info, warn};

use crate::{
    client_config::ClientConfig,
    error::EngineError,
    transport::Transport,
    world::{entity::Entity, entity_event::EntityEvent},
};

use super::outbound_buffer::OutboundBuffer;

/// Applies inbound action frames to the live-entity set and batches
/// outbound invokes.
///
/// The engine owns its `TypeRegistry` and locks it on construction, so all
/// registration has to happen before the first frame is processed.
pub struct ReplicationEngine {
    config: ClientConfig,
    registry: TypeRegistry,
    entities: HashMap<u64, Entity>,
    outbound: OutboundBuffer,
}

impl ReplicationEngine {
    pub fn new(config: ClientConfig, mut registry: TypeRegistry) -> Self {
        if !registry.is_locked() {
            registry.lock();
        }
        let outbound = OutboundBuffer::new(config.max_outbound_bytes);
        Self {
            config,
            registry,
            entities: HashMap::new(),
            outbound,
        }
    }

    // Inbound

    /// Parse `bytes` into frames and apply them in order.
    ///
    /// A malformed frame ends processing of this buffer. Frames before it
    /// stay applied.
    pub fn receive(&mut self, bytes: &[u8]) -> Vec<EntityEvent> {
        let mut events = Vec::new();
        let mut parsed = 0;

        for result in FrameReader::new(bytes) {
            let frame = match result {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(
                        "Discarding the rest of a {}-byte buffer after {} frame(s): {}",
                        bytes.len(),
                        parsed,
                        err
                    );
                    break;
                }
            };

            if let Some(max) = self.config.max_frames_per_buffer {
                if parsed >= max {
                    warn!(
                        "Buffer holds more than {} frame(s), discarding the rest",
                        max
                    );
                    break;
                }
            }
            parsed += 1;

            if let Some(event) = self.apply(&frame) {
                events.push(event);
            }
        }

        events
    }

    fn apply(&mut self, frame: &Frame) -> Option<EntityEvent> {
        match frame.action {
            ActionKind::Spawn => self.spawn(frame.entity_id, frame.type_id),
            ActionKind::Despawn => self.despawn(frame.entity_id),
            ActionKind::Change => self.change(frame.entity_id, frame.type_id, frame.payload),
            ActionKind::Invoke => self.invoked(frame.entity_id, frame.type_id, frame.payload),
        }
    }

    fn spawn(&mut self, entity_id: u64, type_id: u32) -> Option<EntityEvent> {
        if self.entities.contains_key(&entity_id) {
            self.dropped(format_args!("Spawn of live entity {}", entity_id));
            return None;
        }
        let Some(parts) = self.registry.instantiate(type_id) else {
            self.dropped(format_args!(
                "Spawn of entity {} with unknown template {}",
                entity_id, type_id
            ));
            return None;
        };

        self.entities
            .insert(entity_id, Entity::new(entity_id, type_id, parts));
        Some(EntityEvent::Spawn { entity_id, type_id })
    }

    fn despawn(&mut self, entity_id: u64) -> Option<EntityEvent> {
        let Some(entity) = self.entities.remove(&entity_id) else {
            self.dropped(format_args!("Despawn of unknown entity {}", entity_id));
            return None;
        };
        Some(EntityEvent::Despawn { entity_id, entity })
    }

    fn change(&mut self, entity_id: u64, type_id: u32, payload: &[u8]) -> Option<EntityEvent> {
        if !self.entities.contains_key(&entity_id) {
            self.dropped(format_args!(
                "Change of type {} for unknown entity {}",
                type_id, entity_id
            ));
            return None;
        }
        let Some(entry) = self.registry.get(type_id) else {
            self.dropped(format_args!(
                "Change of unregistered type {} for entity {}",
                type_id, entity_id
            ));
            return None;
        };

        let value = match Mapper::decode_from_slice(payload, entry.shape()) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "Dropping change of {} for entity {}: {}",
                    entry.name(),
                    entity_id,
                    err
                );
                return None;
            }
        };

        let entity = self.entities.get_mut(&entity_id)?;

        // Convert for every slot first so a failure leaves the entity untouched
        let mut writes: Vec<(usize, PreparedWrite)> = Vec::new();
        for (index, record) in entity.records().iter().enumerate() {
            let Some(binding) = record.slots.get(type_id) else {
                continue;
            };
            match binding.prepare(&value) {
                Ok(write) => writes.push((index, write)),
                Err(err) => {
                    warn!("Dropping change for entity {}: {}", entity_id, err);
                    return None;
                }
            }
        }

        let records = entity.records_mut();
        let mut components_written = 0;
        for (index, write) in writes {
            let component = &mut *records[index].component;
            match write.apply(AsAny::as_any_mut(component)) {
                Ok(()) => {
                    component.on_value_changed(type_id);
                    components_written += 1;
                }
                Err(err) => warn!("{}", err),
            }
        }

        Some(EntityEvent::Change {
            entity_id,
            type_id,
            components_written,
        })
    }

    fn invoked(&mut self, entity_id: u64, type_id: u32, payload: &[u8]) -> Option<EntityEvent> {
        let decoded = match self.registry.get(type_id) {
            Some(entry) => Mapper::decode_from_slice(payload, entry.shape()),
            None => Value::from_bytes(payload).map_err(MapperError::from),
        };
        let value = match decoded {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "Dropping invoke of type {} for entity {}: {}",
                    type_id, entity_id, err
                );
                return None;
            }
        };

        if let Some(entity) = self.entities.get_mut(&entity_id) {
            for record in entity.records_mut() {
                record.component.invoke(type_id, &value);
            }
        }

        Some(EntityEvent::Invoke {
            entity_id,
            type_id,
            value,
        })
    }

    fn dropped(&self, what: std::fmt::Arguments) {
        if self.config.log_dropped_frames {
            debug!("{}, ignoring", what);
        }
    }

    // Outbound

    /// Queue an invoke of `type_id`. Registered types are encoded through
    /// their shape, anything else is written as-is.
    pub fn invoke_value(&mut self, type_id: u32, value: &Value) -> Result<(), EngineError> {
        let payload = match self.registry.get(type_id) {
            Some(entry) => Mapper::encode_to_vec(value, entry.shape())?,
            None => value.to_bytes().map_err(MapperError::from)?,
        };
        self.outbound.push_invoke(type_id, &payload)
    }

    /// Queue an invoke of a typed variant.
    pub fn invoke<V: Variant>(&mut self, value: &V) -> Result<(), EngineError> {
        let mut writer = TagWriter::new();
        Mapper::encode_as(value, &mut writer)?;
        self.outbound.push_invoke(V::TYPE_ID, writer.as_slice())
    }

    /// Pending outbound bytes, without clearing them.
    pub fn outbound(&self) -> &[u8] {
        self.outbound.as_slice()
    }

    pub fn outbound_frame_count(&self) -> usize {
        self.outbound.frame_count()
    }

    /// Take the pending outbound bytes. Returns `None` when nothing is
    /// queued.
    pub fn take_outbound(&mut self) -> Option<Vec<u8>> {
        if self.outbound.is_empty() {
            return None;
        }
        Some(self.outbound.take())
    }

    /// Send the pending outbound bytes as one buffer. They are cleared only
    /// when the transport accepts them.
    pub fn drain_into<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<usize, EngineError> {
        if self.outbound.is_empty() {
            return Ok(0);
        }
        let sent = self.outbound.len();
        transport.send(self.outbound.as_slice())?;
        self.outbound.clear();
        Ok(sent)
    }

    pub fn clear_outbound(&mut self) {
        self.outbound.clear();
    }

    // Live entities

    /// Destroy every live entity, as after a connection reset. Returns how
    /// many were removed.
    pub fn reset(&mut self) -> usize {
        let count = self.entities.len();
        self.entities.clear();
        if count > 0 {
            info!("Reset removed {} live entit(ies)", count);
        }
        count
    }

    pub fn entity(&self, entity_id: u64) -> Option<&Entity> {
        self.entities.get(&entity_id)
    }

    pub fn entity_mut(&mut self, entity_id: u64) -> Option<&mut Entity> {
        self.entities.get_mut(&entity_id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn has_entity(&self, entity_id: u64) -> bool {
        self.entities.contains_key(&entity_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
