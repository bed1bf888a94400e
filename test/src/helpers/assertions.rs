use axon_client::EntityEvent;

/// Install `env_logger` once per test binary. Later calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn spawned_ids(events: &[EntityEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            EntityEvent::Spawn { entity_id, .. } => Some(*entity_id),
            _ => None,
        })
        .collect()
}

/// `(entity id, type id, components written)` of every change event.
pub fn change_counts(events: &[EntityEvent]) -> Vec<(u64, u32, usize)> {
    events
        .iter()
        .filter_map(|event| match event {
            EntityEvent::Change {
                entity_id,
                type_id,
                components_written,
            } => Some((*entity_id, *type_id, *components_written)),
            _ => None,
        })
        .collect()
}
