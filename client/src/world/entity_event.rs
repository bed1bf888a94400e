use axon_shared::Value;

use super::entity::Entity;

/// What one applied frame did to the live-entity set. Returned from every
/// receive in frame order.
#[derive(Debug)]
pub enum EntityEvent {
    Spawn {
        entity_id: u64,
        type_id: u32,
    },
    /// The removed entity is handed back so its components can be torn down.
    Despawn {
        entity_id: u64,
        entity: Entity,
    },
    Change {
        entity_id: u64,
        type_id: u32,
        components_written: usize,
    },
    Invoke {
        entity_id: u64,
        type_id: u32,
        value: Value,
    },
}

impl EntityEvent {
    pub fn entity_id(&self) -> u64 {
        match self {
            EntityEvent::Spawn { entity_id, .. }
            | EntityEvent::Despawn { entity_id, .. }
            | EntityEvent::Change { entity_id, .. }
            | EntityEvent::Invoke { entity_id, .. } => *entity_id,
        }
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self, EntityEvent::Spawn { .. })
    }

    pub fn is_despawn(&self) -> bool {
        matches!(self, EntityEvent::Despawn { .. })
    }

    pub fn is_change(&self) -> bool {
        matches!(self, EntityEvent::Change { .. })
    }

    pub fn is_invoke(&self) -> bool {
        matches!(self, EntityEvent::Invoke { .. })
    }
}
